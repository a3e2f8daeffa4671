//! User settings, persisted to `localStorage` as JSON.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::pinch::{LostHandPolicy, PINCH_THRESHOLD};
use crate::util::local_storage;

pub const SETTINGS_KEY: &str = "aw_settings";

const TASKS_VISION_WASM: &str =
    "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@0.10.14/wasm";
const HAND_LANDMARKER_MODEL: &str = "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pinch_threshold: f64,
    /// Mirror the camera preview and the fingertip x coordinate.
    pub mirror: bool,
    pub max_hands: u32,
    pub lost_hand_policy: LostHandPolicy,
    pub show_skeleton: bool,
    pub show_video: bool,
    pub connector_color: String,
    pub connector_width: f64,
    pub landmark_color: String,
    pub landmark_width: f64,
    pub landmark_radius: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub wasm_base_url: String,
    pub model_asset_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pinch_threshold: PINCH_THRESHOLD,
            mirror: true,
            max_hands: 1,
            lost_hand_policy: LostHandPolicy::Hold,
            show_skeleton: true,
            show_video: true,
            connector_color: "#00FF00".to_string(),
            connector_width: 5.0,
            landmark_color: "#FF0000".to_string(),
            landmark_width: 2.0,
            landmark_radius: 3.0,
            stroke_color: "#f0f6fc".to_string(),
            stroke_width: 4.0,
            wasm_base_url: TASKS_VISION_WASM.to_string(),
            model_asset_path: HAND_LANDMARKER_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Parses stored JSON; anything unreadable falls back to defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Settings>(raw) {
            Ok(s) => s.sanitized(),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable settings");
                Settings::default()
            }
        }
    }

    pub fn sanitized(mut self) -> Self {
        if !(self.pinch_threshold > 0.0 && self.pinch_threshold <= 1.0) {
            self.pinch_threshold = PINCH_THRESHOLD;
        }
        self.max_hands = self.max_hands.clamp(1, 2);
        self.connector_width = self.connector_width.max(1.0);
        self.landmark_width = self.landmark_width.max(1.0);
        self.landmark_radius = self.landmark_radius.max(1.0);
        self.stroke_width = self.stroke_width.max(1.0);
        self
    }
}

pub fn load() -> Settings {
    local_storage()
        .and_then(|store| store.get_item(SETTINGS_KEY).ok().flatten())
        .map(|raw| Settings::from_json(&raw))
        .unwrap_or_default()
}

pub fn save(settings: &Settings) {
    let Some(store) = local_storage() else {
        return;
    };
    match serde_json::to_string(settings) {
        Ok(s) => {
            let _ = store.set_item(SETTINGS_KEY, &s);
        }
        Err(e) => warn!(error = %e, "could not serialize settings"),
    }
}

pub fn reset() -> Settings {
    if let Some(store) = local_storage() {
        let _ = store.remove_item(SETTINGS_KEY);
    }
    Settings::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let s = Settings::from_json(r#"{"mirror":false,"lost_hand_policy":"release"}"#);
        assert!(!s.mirror);
        assert_eq!(s.lost_hand_policy, LostHandPolicy::Release);
        assert_eq!(s.pinch_threshold, PINCH_THRESHOLD);
        assert_eq!(s.connector_color, "#00FF00");
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let s = Settings {
            pinch_threshold: -1.0,
            max_hands: 0,
            stroke_width: 0.0,
            landmark_radius: 0.2,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.pinch_threshold, PINCH_THRESHOLD);
        assert_eq!(s.max_hands, 1);
        assert_eq!(s.stroke_width, 1.0);
        assert_eq!(s.landmark_radius, 1.0);

        let nan = Settings {
            pinch_threshold: f64::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(nan.pinch_threshold, PINCH_THRESHOLD);
    }

    #[test]
    fn round_trip_preserves_custom_values() {
        let s = Settings {
            pinch_threshold: 0.08,
            stroke_color: "#58a6ff".into(),
            ..Settings::default()
        };
        let raw = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&raw), s);
    }
}
