//! Card Scan Common Library
//!
//! CLIとWeb(WASM)で共有される型・セッション制御・エクスポート処理

pub mod types;
pub mod error;
pub mod session;
pub mod prompts;
pub mod parser;
pub mod gemini;
pub mod export;

pub use types::{CardField, HistoryEntry, StructuredRecord};
pub use error::{Error, ExtractionError, ExtractionErrorKind, Result, WhatsAppError};
pub use session::{Completion, ScanTicket, Session, SessionEvent, ViewState};
pub use prompts::build_extraction_prompt;
pub use parser::{extract_json, parse_record};
pub use gemini::{classify_http_status, parse_generate_response, GeminiRequest};
pub use export::csv::{export_file_name, format_local_timestamp, history_to_csv};
pub use export::whatsapp::{build_whatsapp_link, sanitize_recipient};
