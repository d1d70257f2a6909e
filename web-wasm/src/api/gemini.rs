//! Gemini API連携（ブラウザ fetch）
//!
//! リクエスト組み立てと応答の分類は cardscan_common::gemini に任せ、
//! ここでは送信と失敗のタグ付けだけを行う。

use cardscan_common::gemini::{endpoint_url, http_error, DEFAULT_MODEL};
use cardscan_common::{parse_generate_response, ExtractionError, ExtractionErrorKind, GeminiRequest, StructuredRecord};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ビルド時に埋め込まれたAPIキー（設定画面で上書きできる）
pub fn default_api_key() -> String {
    option_env!("GEMINI_API_KEY").unwrap_or_default().to_string()
}

/// 名刺画像1枚を抽出（1回だけ送信し、リトライしない）
///
/// # Arguments
/// * `api_key` - Gemini API key
/// * `image_data` - "data:image/jpeg;base64,..." 形式のData URL、または生のBase64
pub async fn extract_card(
    api_key: &str,
    image_data: &str,
) -> Result<StructuredRecord, ExtractionError> {
    if api_key.trim().is_empty() {
        return Err(ExtractionError::new(
            ExtractionErrorKind::InvalidApiKey,
            "API key is not set",
        ));
    }

    let request = GeminiRequest::for_card_image(image_data);
    let body = serde_json::to_string(&request)
        .map_err(|e| ExtractionError::new(ExtractionErrorKind::Unknown, e.to_string()))?;

    let (status, text) = post_json(&endpoint_url(DEFAULT_MODEL, api_key), &body)
        .await
        .map_err(|e| ExtractionError::new(ExtractionErrorKind::Network, js_detail(&e)))?;

    if !(200..300).contains(&status) {
        return Err(http_error(status, &text));
    }

    parse_generate_response(&text)
}

/// fetch でPOSTし、ステータスと本文を返す
///
/// ここでのErrはfetch自体の失敗（オフライン・CORS等）だけ。
async fn post_json(url: &str, body: &str) -> Result<(u16, String), JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
