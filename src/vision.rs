//! Bindings to MediaPipe Tasks Vision: the hand landmarker and the skeleton
//! drawing utility. Both are black boxes; only their JS contracts live here.

use serde::Serialize;
use tracing::info;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlVideoElement};

use crate::config::Settings;
use crate::error::{AppError, describe_js};
use crate::model::{Detection, Landmark};
use crate::util::to_js;

#[wasm_bindgen(module = "/js/vision.js")]
extern "C" {
    type HandLandmarker;

    #[wasm_bindgen(js_name = createHandLandmarker)]
    fn create_hand_landmarker(wasm_base: &str, options: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method, catch, js_name = detectForVideo)]
    fn detect_for_video(
        this: &HandLandmarker,
        video: &HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn close(this: &HandLandmarker);

    #[wasm_bindgen(js_name = handConnections)]
    fn hand_connections() -> JsValue;

    type DrawingUtils;

    #[wasm_bindgen(constructor)]
    fn new(ctx: &CanvasRenderingContext2d) -> DrawingUtils;

    #[wasm_bindgen(method, js_name = drawConnectors)]
    fn draw_connectors(
        this: &DrawingUtils,
        landmarks: &JsValue,
        connections: &JsValue,
        style: &JsValue,
    );

    #[wasm_bindgen(method, js_name = drawLandmarks)]
    fn draw_landmarks(this: &DrawingUtils, landmarks: &JsValue, style: &JsValue);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BaseOptions<'a> {
    model_asset_path: &'a str,
    delegate: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LandmarkerOptions<'a> {
    base_options: BaseOptions<'a>,
    running_mode: &'a str,
    num_hands: u32,
}

/// A loaded hand landmarker in VIDEO mode. Closed on drop.
pub struct Detector {
    inner: HandLandmarker,
}

impl Detector {
    pub async fn load(settings: &Settings) -> Result<Self, AppError> {
        let options = to_js(&LandmarkerOptions {
            base_options: BaseOptions {
                model_asset_path: &settings.model_asset_path,
                delegate: "GPU",
            },
            running_mode: "VIDEO",
            num_hands: settings.max_hands,
        })?;
        let promise = create_hand_landmarker(&settings.wasm_base_url, &options);
        let inner = JsFuture::from(promise)
            .await
            .map_err(|e| AppError::Detector(describe_js(&e)))?;
        info!(num_hands = settings.max_hands, "hand landmarker loaded");
        Ok(Self {
            inner: inner.unchecked_into(),
        })
    }

    /// Runs the model synchronously on the current video frame.
    pub fn detect(&self, video: &HtmlVideoElement, timestamp_ms: f64) -> Result<Detection, AppError> {
        let raw = self
            .inner
            .detect_for_video(video, timestamp_ms)
            .map_err(|e| AppError::Detector(describe_js(&e)))?;
        let json = js_sys::JSON::stringify(&raw)?;
        Ok(serde_json::from_str(&String::from(json))?)
    }
}

impl Drop for Detector {
    fn drop(&mut self) {
        self.inner.close();
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectorStyle<'a> {
    color: &'a str,
    line_width: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PointStyle<'a> {
    color: &'a str,
    line_width: f64,
    radius: f64,
}

/// Draws a hand skeleton on an overlay context. Styling comes from settings;
/// the line and point rasterisation is MediaPipe's.
pub struct SkeletonPainter {
    utils: DrawingUtils,
    connections: JsValue,
}

impl SkeletonPainter {
    pub fn new(ctx: &CanvasRenderingContext2d) -> Self {
        Self {
            utils: DrawingUtils::new(ctx),
            connections: hand_connections(),
        }
    }

    pub fn draw(&self, hand: &[Landmark], settings: &Settings) -> Result<(), AppError> {
        let landmarks = to_js(&hand)?;
        let connector = to_js(&ConnectorStyle {
            color: &settings.connector_color,
            line_width: settings.connector_width,
        })?;
        let points = to_js(&PointStyle {
            color: &settings.landmark_color,
            line_width: settings.landmark_width,
            radius: settings.landmark_radius,
        })?;
        self.utils
            .draw_connectors(&landmarks, &self.connections, &connector);
        self.utils.draw_landmarks(&landmarks, &points);
        Ok(())
    }
}
