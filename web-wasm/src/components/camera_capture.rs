//! カメラ撮影コンポーネント
//!
//! getUserMedia で背面カメラを映し、撮影ボタンでフレームをJPEGのData URLにする。
//! 撮影・キャンセル・アンマウントのいずれでもカメラのトラックを停止する。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

const JPEG_MIME: &str = "image/jpeg";

#[derive(Default)]
struct CameraState {
    stream: Option<MediaStream>,
    closed: bool,
}

#[component]
pub fn CameraCapture(
    on_capture: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let camera = StoredValue::new_local(CameraState::default());
    let (camera_error, set_camera_error) = signal(None::<String>);

    // video要素がマウントされたらカメラを開始
    Effect::new(move |_| {
        let Some(video) = video_ref.get() else {
            return;
        };
        spawn_local(async move {
            match start_camera(&video).await {
                Ok(stream) => {
                    let stored = camera.try_update_value(|state| {
                        if state.closed {
                            false
                        } else {
                            state.stream = Some(stream.clone());
                            true
                        }
                    });
                    // 起動待ちの間に閉じられていたら即停止
                    if stored != Some(true) {
                        stop_tracks(&stream);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %js_detail(&e), "camera unavailable");
                    let _ = set_camera_error
                        .try_set(Some("Camera is not available. Check the permission or upload a file instead.".to_string()));
                }
            }
        });
    });

    on_cleanup(move || release(camera));

    let capture = move |_| {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        match capture_frame(&video) {
            Ok(data_url) => {
                release(camera);
                on_capture.run(data_url);
            }
            Err(e) => {
                tracing::warn!(error = %js_detail(&e), "capture failed");
                set_camera_error.set(Some("Could not take the picture. Please try again.".to_string()));
            }
        }
    };

    let cancel = move |_| {
        release(camera);
        on_cancel.run(());
    };

    view! {
        <section class="camera-view">
            <video
                class="camera-preview"
                node_ref=video_ref
                autoplay=true
                playsinline=true
                prop:muted=true
            />
            <div class="camera-frame" />
            {move || camera_error.get().map(|msg| view! { <p class="inline-error">{msg}</p> })}
            <div class="camera-actions">
                <button class="btn btn-tertiary" on:click=cancel>"Cancel"</button>
                <button
                    class="btn btn-primary btn-shutter"
                    disabled=move || camera_error.with(Option::is_some)
                    on:click=capture
                >
                    "Capture"
                </button>
            </div>
        </section>
    }
}

/// 背面カメラを開いてvideo要素に接続
async fn start_camera(video: &HtmlVideoElement) -> Result<MediaStream, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;

    let video_constraints = js_sys::Object::new();
    js_sys::Reflect::set(
        &video_constraints,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str("environment"),
    )?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;

    video.set_src_object(Some(&stream));
    // autoplay が効かないブラウザ向け。失敗しても表示はされる
    let _ = video.play();
    Ok(stream)
}

/// 現在のフレームをJPEGのData URLにする
fn capture_frame(video: &HtmlVideoElement) -> Result<String, JsValue> {
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err(JsValue::from_str("camera not ready"));
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

    canvas.to_data_url_with_type(JPEG_MIME)
}

fn release(camera: StoredValue<CameraState, LocalStorage>) {
    camera.try_update_value(|state| {
        state.closed = true;
        if let Some(stream) = state.stream.take() {
            stop_tracks(&stream);
        }
    });
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
