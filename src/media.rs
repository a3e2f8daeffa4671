// Camera acquisition via getUserMedia.
use tracing::info;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::error::{AppError, describe_js};

/// Requests a video-only stream.
pub async fn open_camera() -> Result<MediaStream, AppError> {
    let window = web_sys::window().ok_or(AppError::NoWindow)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| AppError::Camera(describe_js(&e)))?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| AppError::Camera(describe_js(&e)))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| AppError::Camera(describe_js(&e)))?;
    stream
        .dyn_into::<MediaStream>()
        .map_err(|_| AppError::Camera("getUserMedia did not return a MediaStream".into()))
}

/// Binds the stream to the video element and starts playback.
pub async fn attach(video: &HtmlVideoElement, stream: &MediaStream) -> Result<(), AppError> {
    video.set_muted(true);
    video.set_src_object(Some(stream));
    let playing = video.play()?;
    JsFuture::from(playing)
        .await
        .map_err(|e| AppError::Camera(describe_js(&e)))?;
    info!(
        width = video.video_width(),
        height = video.video_height(),
        "camera streaming"
    );
    Ok(())
}

pub fn stop(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}
