//! CSVファイル出力

use cardscan_common::{export_file_name, format_local_timestamp, history_to_csv, HistoryEntry};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// 履歴をCSVファイルに書き出す
///
/// 履歴が空ならファイルを作らずNoneを返す。
pub fn write_history_csv(
    history: &[HistoryEntry],
    output_dir: &Path,
    date: NaiveDate,
) -> Result<Option<PathBuf>> {
    let Some(csv) = history_to_csv(history, format_local_timestamp) else {
        return Ok(None);
    };

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(export_file_name(date));
    std::fs::write(&path, csv)?;
    tracing::info!(path = %path.display(), rows = history.len(), "csv written");
    Ok(Some(path))
}
