//! CSVダウンロードとWhatsAppリンクの起動

use cardscan_common::{export_file_name, history_to_csv, HistoryEntry};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// ブラウザのロケールでの日時表示
pub fn locale_timestamp(timestamp_ms: i64) -> String {
    js_sys::Date::new(&JsValue::from_f64(timestamp_ms as f64))
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}

/// 履歴をCSVにしてダウンロードさせる
///
/// 履歴が空なら何もしない（Ok(false)）。
pub fn download_history_csv(history: &[HistoryEntry]) -> Result<bool, JsValue> {
    let Some(csv) = history_to_csv(history, locale_timestamp) else {
        return Ok(false);
    };
    let file_name = export_file_name(chrono::Local::now().date_naive());
    download_text(&file_name, &csv, "text/csv;charset=utf-8;")?;
    tracing::info!(rows = history.len(), %file_name, "csv exported");
    Ok(true)
}

/// テキストをファイルとしてダウンロード
///
/// Blob URLはクリック後に解放する。
pub fn download_text(file_name: &str, content: &str, mime_type: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let props = BlobPropertyBag::new();
    props.set_type(mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &props)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let result = click_download_link(&url, file_name);
    Url::revoke_object_url(&url)?;
    result
}

fn click_download_link(url: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_download(file_name);

    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

/// WhatsAppリンクを新しいタブで開く（応答は読まない）
pub fn open_in_new_tab(url: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.open_with_url_and_target(url, "_blank")?;
    Ok(())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_locale_timestamp_is_not_raw_number() {
        let formatted = locale_timestamp(1_700_000_000_000);
        assert!(!formatted.is_empty());
        assert_ne!(formatted, "1700000000000");
    }

    #[wasm_bindgen_test]
    fn wasm_empty_history_downloads_nothing() {
        assert_eq!(download_history_csv(&[]).unwrap(), false);
    }
}
