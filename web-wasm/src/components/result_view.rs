//! 抽出結果画面
//!
//! 編集フォーム・WhatsApp送信・「戻る」「次の名刺をスキャン」

use cardscan_common::{build_whatsapp_link, CardField, Session};
use leptos::prelude::*;

use crate::components::card_editor::CardEditor;
use crate::export::download::open_in_new_tab;

#[component]
pub fn ResultView(session: RwSignal<Session>) -> impl IntoView {
    let record = Memo::new(move |_| session.with(|s| s.current().clone()));
    let (recipient, set_recipient) = signal(String::new());
    let (whatsapp_error, set_whatsapp_error) = signal(None::<String>);

    let on_edit = Callback::new(move |(field, value): (CardField, String)| {
        session.update(|s| s.apply_field_edit(field, value));
    });

    let send_whatsapp = move |_| {
        let link = record.with_untracked(|r| recipient.with_untracked(|to| build_whatsapp_link(r, to)));
        match link {
            Ok(url) => {
                set_whatsapp_error.set(None);
                if let Err(e) = open_in_new_tab(&url) {
                    tracing::warn!(error = ?e, "failed to open whatsapp");
                }
            }
            Err(e) => set_whatsapp_error.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="result-view">
            <h2>"Scanned card"</h2>
            <CardEditor record=record.into() on_edit=on_edit />

            <div class="whatsapp-panel">
                <label for="whatsapp-to">"Send to WhatsApp number"</label>
                <div class="whatsapp-row">
                    <input
                        type="tel"
                        id="whatsapp-to"
                        placeholder="+1 555 123 4567"
                        prop:value=move || recipient.get()
                        on:input=move |ev| {
                            set_recipient.set(event_target_value(&ev));
                            set_whatsapp_error.set(None);
                        }
                    />
                    <button class="btn btn-whatsapp" on:click=send_whatsapp>
                        "Send via WhatsApp"
                    </button>
                </div>
                {move || whatsapp_error.get().map(|msg| view! { <p class="inline-error">{msg}</p> })}
            </div>

            <div class="result-actions">
                <button
                    class="btn btn-secondary"
                    on:click=move |_| session.update(|s| {
                        s.back();
                    })
                >
                    "← Back"
                </button>
                <button
                    class="btn btn-primary"
                    on:click=move |_| session.update(|s| {
                        s.scan_another();
                    })
                >
                    "Scan another card"
                </button>
            </div>
        </section>
    }
}
