//! エクスポート共通処理
//!
//! - whatsapp: wa.me ディープリンク生成
//! - csv: セッション履歴のCSV化

pub mod csv;
pub mod whatsapp;
