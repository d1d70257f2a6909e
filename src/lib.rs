//! cardscan CLI ライブラリ
//!
//! Web版と同じ Session / エクスポート処理（cardscan_common）を
//! コマンドラインから使うための薄い層

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod scan;
pub mod scanner;
