//! Gemini API のワイヤ型と応答の分類
//!
//! 送信（fetch / reqwest）はCLIとWASMでそれぞれ実装し、
//! リクエスト組み立て・HTTPステータスの分類・応答本文の解釈はここで共有する。

use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, ExtractionErrorKind};
use crate::parser::parse_record;
use crate::prompts::build_extraction_prompt;
use crate::types::StructuredRecord;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// generateContent のエンドポイントURL
pub fn endpoint_url(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

/// Gemini APIレスポンス
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeminiResponse {
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub status: String,
}

/// Data URLからBase64データ部分を抽出
///
/// カンマがなければ生のBase64とみなしてそのまま返す。
pub fn extract_base64_from_data_url(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((_, data)) => data,
        None => data_url,
    }
}

/// Data URLからMIMEタイプを抽出（不明な場合は image/jpeg）
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty() && !s.contains(','))
        .unwrap_or("image/jpeg")
}

impl GeminiRequest {
    /// 名刺画像1枚の抽出リクエスト
    pub fn for_card_image(image_data: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: build_extraction_prompt(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: extract_mime_type_from_data_url(image_data).to_string(),
                            data: extract_base64_from_data_url(image_data).to_string(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

/// 非2xxレスポンスの分類
pub fn classify_http_status(status: u16, body: &str) -> ExtractionErrorKind {
    let mentions_key = {
        let lower = body.to_lowercase();
        lower.contains("api key") || lower.contains("api_key")
    };
    match status {
        400 if mentions_key => ExtractionErrorKind::InvalidApiKey,
        401 | 403 => ExtractionErrorKind::InvalidApiKey,
        429 | 500 | 503 => ExtractionErrorKind::Overloaded,
        _ => ExtractionErrorKind::Unknown,
    }
}

/// 非2xxレスポンスを ExtractionError に変換
pub fn http_error(status: u16, body: &str) -> ExtractionError {
    let detail = serde_json::from_str::<GeminiResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map(|e| format!("{} {}: {}", e.code, e.status, e.message))
        .unwrap_or_else(|| format!("HTTP {}", status));
    ExtractionError::new(classify_http_status(status, body), detail)
}

/// 2xxレスポンス本文を解釈
pub fn parse_generate_response(body: &str) -> Result<StructuredRecord, ExtractionError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| ExtractionError::new(ExtractionErrorKind::Parse, e.to_string()))?;

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ExtractionError::new(ExtractionErrorKind::SafetyBlocked, reason));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ExtractionError::new(
            ExtractionErrorKind::NoCardDetected,
            "no candidates",
        ));
    };

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ExtractionError::new(ExtractionErrorKind::SafetyBlocked, "SAFETY"));
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ExtractionError::new(
            ExtractionErrorKind::NoCardDetected,
            "empty response text",
        ));
    }

    let record = parse_record(&text)
        .map_err(|e| ExtractionError::new(ExtractionErrorKind::Parse, e.to_string()))?;

    if record.is_empty() {
        return Err(ExtractionError::new(
            ExtractionErrorKind::NoCardDetected,
            "all fields empty",
        ));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_text(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    // =============================================
    // Data URL抽出テスト
    // =============================================

    #[test]
    fn test_extract_base64_from_data_url_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        assert_eq!(extract_base64_from_data_url(data_url), "/9j/4AAQSkZJRg==");
    }

    #[test]
    fn test_extract_base64_raw() {
        assert_eq!(extract_base64_from_data_url("iVBORw0KGgo="), "iVBORw0KGgo=");
    }

    #[test]
    fn test_extract_mime_type_png() {
        let data_url = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(extract_mime_type_from_data_url(data_url), "image/png");
    }

    #[test]
    fn test_extract_mime_type_default() {
        assert_eq!(extract_mime_type_from_data_url("iVBORw0KGgo="), "image/jpeg");
        assert_eq!(extract_mime_type_from_data_url("data:;base64,AAAA"), "image/jpeg");
    }

    // =============================================
    // リクエスト シリアライズテスト
    // =============================================

    #[test]
    fn test_request_serialize() {
        let request = GeminiRequest::for_card_image("data:image/webp;base64,UklGR");
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"mime_type\":\"image/webp\""));
        assert!(json.contains("\"data\":\"UklGR\""));
        assert!(json.contains("fullName"));
    }

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("gemini-2.0-flash", "KEY");
        assert!(url.ends_with("/gemini-2.0-flash:generateContent?key=KEY"));
    }

    // =============================================
    // ステータス分類テスト
    // =============================================

    #[test]
    fn test_classify_http_status() {
        assert_eq!(
            classify_http_status(400, r#"{"error":{"message":"API key not valid."}}"#),
            ExtractionErrorKind::InvalidApiKey
        );
        assert_eq!(classify_http_status(400, "bad image"), ExtractionErrorKind::Unknown);
        assert_eq!(classify_http_status(403, ""), ExtractionErrorKind::InvalidApiKey);
        assert_eq!(classify_http_status(429, ""), ExtractionErrorKind::Overloaded);
        assert_eq!(classify_http_status(503, ""), ExtractionErrorKind::Overloaded);
        assert_eq!(classify_http_status(418, ""), ExtractionErrorKind::Unknown);
    }

    #[test]
    fn test_http_error_detail_from_body() {
        let body = r#"{"error":{"code":429,"message":"Resource exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = http_error(429, body);
        assert_eq!(err.kind, ExtractionErrorKind::Overloaded);
        assert!(err.detail.contains("RESOURCE_EXHAUSTED"));
    }

    // =============================================
    // 応答解釈テスト
    // =============================================

    #[test]
    fn test_parse_generate_response_success() {
        let body = wrap_text(r#"{"fullName": "Jane Doe", "company": "Acme"}"#);
        let record = parse_generate_response(&body).unwrap();
        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.company, "Acme");
    }

    #[test]
    fn test_parse_generate_response_prompt_blocked() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = parse_generate_response(body).unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::SafetyBlocked);
    }

    #[test]
    fn test_parse_generate_response_candidate_safety() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let err = parse_generate_response(body).unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::SafetyBlocked);
    }

    #[test]
    fn test_parse_generate_response_no_candidates() {
        let err = parse_generate_response(r#"{"candidates": []}"#).unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::NoCardDetected);
    }

    #[test]
    fn test_parse_generate_response_all_empty() {
        let body = wrap_text(r#"{"fullName": "", "company": ""}"#);
        let err = parse_generate_response(&body).unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::NoCardDetected);
    }

    #[test]
    fn test_parse_generate_response_bad_text() {
        let body = wrap_text("I cannot help with that.");
        let err = parse_generate_response(&body).unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::Parse);
    }

    #[test]
    fn test_parse_generate_response_bad_envelope() {
        let err = parse_generate_response("<html>oops</html>").unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::Parse);
    }
}
