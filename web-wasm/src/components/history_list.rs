//! セッション履歴の一覧（閲覧のみ）

use cardscan_common::HistoryEntry;
use leptos::prelude::*;

use crate::export::download::locale_timestamp;

#[component]
pub fn HistoryList(history: Signal<Vec<HistoryEntry>>) -> impl IntoView {
    view! {
        <Show
            when=move || history.with(|h| !h.is_empty())
            fallback=|| view! { <p class="text-muted">"No cards scanned in this session yet."</p> }
        >
            <ul class="history-list">
                <For
                    each=move || history.get()
                    key=|entry: &HistoryEntry| entry.id.clone()
                    children=|entry| view! { <HistoryItem entry=entry /> }
                />
            </ul>
        </Show>
    }
}

#[component]
fn HistoryItem(entry: HistoryEntry) -> impl IntoView {
    let name = if entry.record.full_name.is_empty() {
        "(no name)".to_string()
    } else {
        entry.record.full_name.clone()
    };
    let company = entry.record.company.clone();
    let scanned_at = locale_timestamp(entry.timestamp_ms);

    view! {
        <li class="history-item">
            <div class="history-item-info">
                <strong>{name}</strong>
                <span class="history-company">{company}</span>
            </div>
            <time class="history-time">{scanned_at}</time>
        </li>
    }
}
