//! メインアプリケーションコンポーネント
//!
//! Session を1つだけ保持し、画面状態に応じてビューを切り替える。
//! 抽出の非同期呼び出しはここで起動し、結果をチケット付きで Session に戻す。

use cardscan_common::{ScanTicket, Session, ViewState};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::gemini::{default_api_key, extract_card};
use crate::components::{
    camera_capture::CameraCapture,
    header::Header,
    home_view::HomeView,
    processing_view::ProcessingView,
    result_view::ResultView,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let session = RwSignal::new(Session::new());
    let api_key = RwSignal::new(default_api_key());

    // 状態が変わったときだけビューを作り直す（編集のたびには作り直さない）
    let view_state = Memo::new(move |_| session.with(|s| s.view()));

    // カメラ撮影: Capturing（またはHome）から抽出へ
    let on_capture = Callback::new(move |image_data: String| {
        let mut ticket = None;
        session.update(|s| ticket = s.begin_extraction());
        if let Some(ticket) = ticket {
            run_extraction(session, api_key, ticket, image_data);
        }
    });

    // ファイル: 読込完了時にHomeにいる場合だけ抽出へ
    let on_upload = Callback::new(move |image_data: String| {
        let mut ticket = None;
        session.update(|s| ticket = s.begin_upload());
        if let Some(ticket) = ticket {
            run_extraction(session, api_key, ticket, image_data);
        }
    });

    let on_cancel_capture = Callback::new(move |_| {
        session.update(|s| {
            s.cancel_capture();
        })
    });

    view! {
        <div class="container">
            <Header />

            {move || match view_state.get() {
                ViewState::Home => view! {
                    <HomeView session=session api_key=api_key on_upload=on_upload />
                }
                .into_any(),
                ViewState::Capturing => view! {
                    <CameraCapture on_capture=on_capture on_cancel=on_cancel_capture />
                }
                .into_any(),
                ViewState::Processing => view! { <ProcessingView /> }.into_any(),
                ViewState::Result => view! { <ResultView session=session /> }.into_any(),
            }}
        </div>
    }
}

fn run_extraction(
    session: RwSignal<Session>,
    api_key: RwSignal<String>,
    ticket: ScanTicket,
    image_data: String,
) {
    let key = api_key.get_untracked();
    spawn_local(async move {
        let outcome = extract_card(&key, &image_data).await;
        let now_ms = js_sys::Date::now() as i64;
        // 結果は必ず Session に渡す（古いチケットは Session 側で捨てる）
        session.try_update(|s| s.complete_extraction(ticket, outcome, now_ms));
    });
}
