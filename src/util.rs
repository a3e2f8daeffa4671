// DOM helpers shared by the components and the frame loop.
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Storage};

use crate::error::AppError;
use crate::model::CanvasSize;

pub fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// High-resolution timestamp in milliseconds.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, AppError> {
    canvas
        .get_context("2d")?
        .ok_or(AppError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| AppError::NoContext)
}

/// Matches the backing store to the element's laid-out size so that canvas
/// pixels and CSS pixels coincide.
pub fn fit_canvas(canvas: &HtmlCanvasElement) {
    let w = canvas.client_width().max(0) as u32;
    let h = canvas.client_height().max(0) as u32;
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
}

pub fn canvas_size(canvas: &HtmlCanvasElement) -> CanvasSize {
    CanvasSize::new(canvas.width() as f64, canvas.height() as f64)
}

/// Converts a serde value into a plain JS object via JSON.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, AppError> {
    let raw = serde_json::to_string(value)?;
    Ok(js_sys::JSON::parse(&raw)?)
}
