//! セッション履歴のCSV出力
//!
//! ヘッダー（8項目＋Timestamp）と、履歴順（新しい順）の行を出力する。
//! カンマ・ダブルクォート・改行（CR/LF）を含むセルだけをクォートし、内部の " は "" にする。

use chrono::{Local, NaiveDate, TimeZone};

use crate::types::{CardField, HistoryEntry};

pub const TIMESTAMP_HEADER: &str = "Timestamp";

/// セルのエスケープ
pub fn escape_cell(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// ヘッダー行
pub fn header_row() -> String {
    CardField::ALL
        .iter()
        .map(|f| f.label())
        .chain(std::iter::once(TIMESTAMP_HEADER))
        .map(escape_cell)
        .collect::<Vec<_>>()
        .join(",")
}

/// 履歴をCSV文字列に変換
///
/// 履歴が空ならNone（ファイルは作らない）。
/// `format_timestamp` はエポックミリ秒を表示用の日時文字列にする。
pub fn history_to_csv<F>(history: &[HistoryEntry], format_timestamp: F) -> Option<String>
where
    F: Fn(i64) -> String,
{
    if history.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(history.len() + 1);
    lines.push(header_row());

    for entry in history {
        let cells: Vec<String> = CardField::ALL
            .iter()
            .map(|f| escape_cell(entry.record.get(*f)))
            .chain(std::iter::once(escape_cell(&format_timestamp(
                entry.timestamp_ms,
            ))))
            .collect();
        lines.push(cells.join(","));
    }

    let mut csv = lines.join("\n");
    csv.push('\n');
    Some(csv)
}

/// 出力ファイル名（business_cards_export_YYYY-MM-DD.csv）
pub fn export_file_name(date: NaiveDate) -> String {
    format!("business_cards_export_{}.csv", date.format("%Y-%m-%d"))
}

/// ローカル時刻での日時表示
pub fn format_local_timestamp(timestamp_ms: i64) -> String {
    format_timestamp_in(&Local, timestamp_ms)
}

/// 任意のタイムゾーンでの日時表示。範囲外の値は数値のまま出す
pub fn format_timestamp_in<Tz>(tz: &Tz, timestamp_ms: i64) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format("%Y/%m/%d %H:%M:%S").to_string(),
        None => timestamp_ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StructuredRecord;
    use chrono::Utc;

    fn entry(name: &str, company: &str, ts: i64) -> HistoryEntry {
        HistoryEntry {
            id: format!("id-{}", ts),
            timestamp_ms: ts,
            record: StructuredRecord {
                full_name: name.to_string(),
                company: company.to_string(),
                ..Default::default()
            },
        }
    }

    fn utc(ts: i64) -> String {
        format_timestamp_in(&Utc, ts)
    }

    // =============================================
    // エスケープテスト
    // =============================================

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape_cell("Acme"), "Acme");
        assert_eq!(escape_cell(""), "");
    }

    #[test]
    fn test_escape_comma_and_quotes() {
        assert_eq!(escape_cell(r#"He said, "hi""#), r#""He said, ""hi""""#);
    }

    #[test]
    fn test_escape_newline() {
        assert_eq!(escape_cell("1 Main St\nSpringfield"), "\"1 Main St\nSpringfield\"");
    }

    #[test]
    fn test_escape_carriage_return() {
        assert_eq!(escape_cell("1 Main St\rSpringfield"), "\"1 Main St\rSpringfield\"");
        assert_eq!(escape_cell("a\r\nb"), "\"a\r\nb\"");
    }

    #[test]
    fn test_escape_quote_only() {
        assert_eq!(escape_cell(r#"The "Best" Co"#), r#""The ""Best"" Co""#);
    }

    // =============================================
    // CSV生成テスト
    // =============================================

    #[test]
    fn test_empty_history_produces_nothing() {
        assert!(history_to_csv(&[], utc).is_none());
    }

    #[test]
    fn test_header_row() {
        assert_eq!(
            header_row(),
            "Full Name,Job Title,Company,Phone,Email,Website,Address,Notes,Timestamp"
        );
    }

    #[test]
    fn test_rows_follow_history_order() {
        let history = vec![entry("Newer", "B", 2_000), entry("Older", "A", 1_000)];
        let csv = history_to_csv(&history, utc).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Newer,,B,"));
        assert!(lines[2].starts_with("Older,,A,"));
    }

    #[test]
    fn test_row_has_nine_cells_and_formatted_timestamp() {
        let history = vec![entry("Jane", "Acme", 0)];
        let csv = history_to_csv(&history, utc).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Jane,,Acme,,,,,,1970/01/01 00:00:00");
        assert_eq!(row.split(',').count(), 9);
    }

    #[test]
    fn test_row_escapes_cells() {
        let history = vec![entry(r#"He said, "hi""#, "Acme", 0)];
        let csv = history_to_csv(&history, utc).unwrap();
        assert!(csv.contains(r#""He said, ""hi""",,Acme,"#));
    }

    #[test]
    fn test_timestamp_formatter_is_used() {
        let history = vec![entry("Jane", "", 42)];
        let csv = history_to_csv(&history, |ts| format!("T{}", ts)).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with(",T42"));
    }

    // =============================================
    // ファイル名・日時テスト
    // =============================================

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "business_cards_export_2026-03-07.csv");
    }

    #[test]
    fn test_format_timestamp_utc() {
        assert_eq!(utc(1_700_000_000_000), "2023/11/14 22:13:20");
    }

    #[test]
    fn test_format_local_timestamp_shape() {
        let s = format_local_timestamp(1_700_000_000_000);
        assert_eq!(s.len(), "2023/11/14 22:13:20".len());
    }
}
