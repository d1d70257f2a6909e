//! 設定パネルコンポーネント

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(api_key: RwSignal<String>) -> impl IntoView {
    view! {
        <details class="settings-panel">
            <summary>"Settings"</summary>
            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="Enter API key..."
                    autocomplete="off"
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        api_key.set(event_target_value(&ev).trim().to_string());
                    }
                />
                <Show when=move || api_key.with(String::is_empty)>
                    <p class="text-muted">"Scanning needs a Gemini API key."</p>
                </Show>
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "Get an API key →"
                </a>
            </div>
        </details>
    }
}
