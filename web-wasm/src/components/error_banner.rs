//! エラーバナー（Home画面上部、閉じるボタン付き）

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(
    message: Signal<Option<String>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="error-banner" role="alert">
                <span class="error-text">{move || message.get().unwrap_or_default()}</span>
                <button
                    class="btn-close"
                    aria-label="Dismiss"
                    on:click=move |_| on_dismiss.run(())
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
