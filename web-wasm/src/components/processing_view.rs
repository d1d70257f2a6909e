//! 解析中表示

use leptos::prelude::*;

#[component]
pub fn ProcessingView() -> impl IntoView {
    view! {
        <section class="processing-view" aria-busy="true">
            <div class="spinner" />
            <p class="progress-text">"Reading the card..."</p>
        </section>
    }
}
