//! ファイル選択ボタン
//!
//! 画像ファイルを1枚選ばせ、Data URLとして読み込んでから on_upload に渡す。
//! 読込中フラグは親（Home画面）と共有し、その間は撮影ボタンも止める。

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn UploadButton(is_reading: RwSignal<bool>, on_upload: Callback<String>) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let (read_error, set_read_error) = signal(None::<String>);

    let on_click = move |_| {
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    let on_change = move |_| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // 同じファイルを続けて選んでも change が発火するように
        input.set_value("");

        is_reading.set(true);
        set_read_error.set(None);
        spawn_local(async move {
            let file = gloo::file::File::from(file);
            let result = gloo::file::futures::read_as_data_url(&file).await;
            // 読込中に画面が切り替わっていればシグナルは破棄済み
            let _ = is_reading.try_set(false);
            match result {
                Ok(data_url) => on_upload.run(data_url),
                Err(e) => {
                    tracing::warn!(error = %e, "file read failed");
                    let _ = set_read_error
                        .try_set(Some("Could not read the selected file. Please choose another image.".to_string()));
                }
            }
        });
    };

    view! {
        <button
            class="btn btn-secondary btn-large"
            disabled=move || is_reading.get()
            on:click=on_click
        >
            "🖼 Upload file"
        </button>
        {move || read_error.get().map(|msg| view! { <p class="inline-error">{msg}</p> })}
        <input
            type="file"
            accept="image/*"
            class="hidden-input"
            node_ref=input_ref
            on:change=on_change
        />
    }
}
