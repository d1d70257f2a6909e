//! ブラウザへの出力（CSVダウンロード・WhatsApp起動）

pub mod download;
