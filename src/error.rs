use cardscan_common::WhatsAppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardScanError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Gemini API key is not set. Run `cardscan config --set-api-key YOUR_KEY` or set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No images found: {0}")]
    NoImagesFound(String),

    #[error("Failed to read image: {0}")]
    ImageLoad(String),

    #[error("No card was scanned, nothing to send")]
    NothingToSend,

    #[error("{0}")]
    WhatsApp(#[from] WhatsAppError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CardScanError>;
