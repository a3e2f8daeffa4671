use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no global `window`")]
    NoWindow,
    #[error("element `{0}` is not mounted")]
    MissingElement(&'static str),
    #[error("2d context unavailable")]
    NoContext,
    #[error("camera unavailable: {0}")]
    Camera(String),
    #[error("hand landmarker: {0}")]
    Detector(String),
    #[error("could not decode detector output: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Js(describe_js(&value))
    }
}

/// Best-effort text for a thrown JS value (`Error.message`, a string, or debug output).
pub fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
