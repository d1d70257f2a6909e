//! 名刺項目の編集フォーム
//!
//! 入力のたびに (項目, 値) を on_edit に通知する。状態は持たない。

use cardscan_common::{CardField, StructuredRecord};
use leptos::prelude::*;

#[component]
pub fn CardEditor(
    record: Signal<StructuredRecord>,
    on_edit: Callback<(CardField, String)>,
) -> impl IntoView {
    view! {
        <form class="card-editor" on:submit=|ev| ev.prevent_default()>
            {CardField::ALL
                .into_iter()
                .map(|field| view! { <FieldInput field=field record=record on_edit=on_edit /> })
                .collect_view()}
        </form>
    }
}

#[component]
fn FieldInput(
    field: CardField,
    record: Signal<StructuredRecord>,
    on_edit: Callback<(CardField, String)>,
) -> impl IntoView {
    let id = format!("field-{}", field.key());
    let value = move || record.with(|r| r.get(field).to_string());
    let on_input = move |ev: leptos::ev::Event| on_edit.run((field, event_target_value(&ev)));

    let input = match field {
        CardField::Address | CardField::Notes => view! {
            <textarea id=id.clone() rows="2" prop:value=value on:input=on_input />
        }
        .into_any(),
        _ => view! {
            <input type=input_type(field) id=id.clone() prop:value=value on:input=on_input />
        }
        .into_any(),
    };

    view! {
        <div class="form-group">
            <label for=id>{field.label()}</label>
            {input}
        </div>
    }
}

fn input_type(field: CardField) -> &'static str {
    match field {
        CardField::Phone => "tel",
        CardField::Email => "email",
        CardField::Website => "url",
        _ => "text",
    }
}
