//! APIレスポンスパーサー
//!
//! AIの応答テキストからJSONを抽出し、StructuredRecordに変換する。
//! 値が文字列でない場合も受け付ける（数値は文字列化、nullは空文字）。

use crate::error::{Error, Result};
use crate::types::{CardField, StructuredRecord};
use serde_json::{Map, Value};

/// 応答テキストからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最も外側の {...} または [...]
/// 3. エラー
///
/// # Examples
/// ```
/// use cardscan_common::extract_json;
///
/// let response = "Result: {\"fullName\": \"Jane\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"fullName\": \"Jane\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    let object = outer_span(response, '{', '}');
    let array = outer_span(response, '[', ']');

    // 先に開いた方を採用
    let span = match (object, array) {
        (Some(o), Some(a)) => Some(if a.0 < o.0 { a } else { o }),
        (o, a) => o.or(a),
    };

    span.map(|(start, end)| &response[start..=end])
        .ok_or_else(|| Error::Parse("JSONが見つかりません".into()))
}

fn outer_span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then_some((start, end))
}

/// 応答テキストをStructuredRecordにパース
///
/// トップレベルが配列の場合は先頭要素を使う。
pub fn parse_record(response: &str) -> Result<StructuredRecord> {
    let json_str = extract_json(response)?;
    let value: Value = serde_json::from_str(json_str)?;

    let obj = match value {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    };

    let Some(map) = obj.as_object() else {
        return Err(Error::Parse("JSONオブジェクトがありません".into()));
    };

    let mut record = StructuredRecord::default();
    for field in CardField::ALL {
        if let Some(value) = get_string(map, field.key()) {
            record.set(field, value.trim());
        }
    }
    Ok(record)
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key)?;
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    if value.is_null() {
        return None;
    }
    Some(value.to_string())
}
