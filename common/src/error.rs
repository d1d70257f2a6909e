//! エラー型定義
//!
//! - ExtractionError: AI抽出の失敗（7分類）。Home画面のバナーに表示する
//! - WhatsAppError: 送信先未入力。Result画面でその場で表示する

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// AI抽出の失敗分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionErrorKind {
    InvalidApiKey,
    Network,
    Overloaded,
    SafetyBlocked,
    NoCardDetected,
    Parse,
    Unknown,
}

impl ExtractionErrorKind {
    pub const ALL: [ExtractionErrorKind; 7] = [
        ExtractionErrorKind::InvalidApiKey,
        ExtractionErrorKind::Network,
        ExtractionErrorKind::Overloaded,
        ExtractionErrorKind::SafetyBlocked,
        ExtractionErrorKind::NoCardDetected,
        ExtractionErrorKind::Parse,
        ExtractionErrorKind::Unknown,
    ];

    /// 外部クライアントとやり取りする分類タグ
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionErrorKind::InvalidApiKey => "API_KEY_INVALID",
            ExtractionErrorKind::Network => "NETWORK_ERROR",
            ExtractionErrorKind::Overloaded => "SERVER_OVERLOADED",
            ExtractionErrorKind::SafetyBlocked => "SAFETY_BLOCK",
            ExtractionErrorKind::NoCardDetected => "EMPTY_RESPONSE",
            ExtractionErrorKind::Parse => "PARSE_ERROR",
            ExtractionErrorKind::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Home画面に表示するメッセージ
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionErrorKind::InvalidApiKey => {
                "The AI service rejected the API key. Check your configuration and try again."
            }
            ExtractionErrorKind::Network => {
                "Network error. Check your internet connection and try again."
            }
            ExtractionErrorKind::Overloaded => {
                "The AI service is busy right now. Please wait a moment and try again."
            }
            ExtractionErrorKind::SafetyBlocked => {
                "The image was blocked by the AI safety filter. Try a different photo."
            }
            ExtractionErrorKind::NoCardDetected => {
                "No business card was detected. Make sure the card is clearly visible and try again."
            }
            ExtractionErrorKind::Parse => {
                "The AI response could not be read. Please try scanning again."
            }
            ExtractionErrorKind::Unknown => "Something went wrong while scanning the card. Please try again.",
        }
    }
}

/// AI抽出エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} ({detail})", kind.code())]
pub struct ExtractionError {
    pub kind: ExtractionErrorKind,
    pub detail: String,
}

impl ExtractionError {
    pub fn new(kind: ExtractionErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

/// WhatsApp送信エラー
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhatsAppError {
    #[error("Please enter a WhatsApp number including the country code.")]
    MissingRecipient,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("JSONが見つかりません".to_string());
        assert_eq!(format!("{}", error), "Parse error: JSONが見つかりません");
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let messages: HashSet<_> = ExtractionErrorKind::ALL
            .iter()
            .map(|k| k.user_message())
            .collect();
        assert_eq!(messages.len(), 7);
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes: HashSet<_> = ExtractionErrorKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), ExtractionErrorKind::ALL.len());
    }

    #[test]
    fn test_extraction_error_display() {
        let error = ExtractionError::new(ExtractionErrorKind::Network, "fetch failed");
        assert_eq!(format!("{}", error), "NETWORK_ERROR (fetch failed)");
        assert_eq!(error.user_message(), ExtractionErrorKind::Network.user_message());
    }

    #[test]
    fn test_whatsapp_error_display() {
        let display = format!("{}", WhatsAppError::MissingRecipient);
        assert!(display.contains("WhatsApp number"));
    }
}
