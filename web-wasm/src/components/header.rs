//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Card Scan"</h1>
            <p class="header-sub">"Business cards to contacts"</p>
        </header>
    }
}
