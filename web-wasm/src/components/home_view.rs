//! Home画面
//!
//! 撮影/アップロードの入口、エラーバナー、履歴とCSV出力、設定

use cardscan_common::Session;
use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::history_list::HistoryList;
use crate::components::settings_panel::SettingsPanel;
use crate::components::upload_button::UploadButton;
use crate::export::download::download_history_csv;

#[component]
pub fn HomeView(
    session: RwSignal<Session>,
    api_key: RwSignal<String>,
    on_upload: Callback<String>,
) -> impl IntoView {
    let error = Signal::derive(move || session.with(|s| s.error().map(str::to_string)));
    let history = Signal::derive(move || session.with(|s| s.history().to_vec()));
    let (export_error, set_export_error) = signal(None::<String>);
    // ファイル読込中は撮影も始めない
    let is_reading = RwSignal::new(false);

    let on_dismiss = Callback::new(move |_| session.update(|s| s.dismiss_error()));

    let on_export = move |_| {
        let result = session.with_untracked(|s| download_history_csv(s.history()));
        match result {
            Ok(_) => set_export_error.set(None),
            Err(e) => {
                tracing::warn!(error = ?e, "csv export failed");
                set_export_error.set(Some("CSV export failed.".to_string()));
            }
        }
    };

    view! {
        <section class="home-view">
            <ErrorBanner message=error on_dismiss=on_dismiss />

            <div class="scan-actions">
                <button
                    class="btn btn-primary btn-large"
                    disabled=move || is_reading.get()
                    on:click=move |_| session.update(|s| {
                        s.take_picture();
                    })
                >
                    "📷 Take picture"
                </button>
                <UploadButton is_reading=is_reading on_upload=on_upload />
            </div>

            <div class="history-panel">
                <div class="history-header">
                    <h3>{move || format!("This session ({})", history.with(Vec::len))}</h3>
                    <button
                        class="btn btn-secondary btn-small"
                        disabled=move || history.with(Vec::is_empty)
                        on:click=on_export
                    >
                        "Export CSV"
                    </button>
                </div>
                {move || export_error.get().map(|msg| view! { <p class="inline-error">{msg}</p> })}
                <HistoryList history=history />
            </div>

            <SettingsPanel api_key=api_key />
        </section>
    }
}
