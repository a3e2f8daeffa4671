//! Core data models for the air whiteboard.
//! Landmarks arrive from the hand detector in normalized [0,1] frame space;
//! everything the whiteboard consumes is in canvas pixels.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Points per detected hand.
pub const LANDMARK_COUNT: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_TIP: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Depth relative to the wrist; unused by the pinch check.
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in the image plane (z ignored).
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Decoded `HandLandmarkerResult`. Only `landmarks` is read; handedness and
/// world landmarks are dropped by serde.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub landmarks: Vec<Vec<Landmark>>,
}

impl Detection {
    /// First detected hand; additional hands are ignored.
    pub fn first_hand(&self) -> Option<&[Landmark]> {
        self.landmarks.first().map(|h| h.as_slice())
    }
}

/// Thumb tip and index fingertip of a hand, if the set is long enough.
pub fn pinch_points(hand: &[Landmark]) -> Option<(Landmark, Landmark)> {
    let thumb = hand.get(THUMB_TIP)?;
    let index = hand.get(INDEX_FINGER_TIP)?;
    Some((*thumb, *index))
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

impl PointerKind {
    /// DOM event type for this pointer phase.
    pub fn event_type(self) -> &'static str {
        match self {
            PointerKind::Down => "pointerdown",
            PointerKind::Move => "pointermove",
            PointerKind::Up => "pointerup",
        }
    }
}

/// A pointer input destined for the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerAction {
    pub kind: PointerKind,
    pub at: Point,
}

impl PointerAction {
    pub fn new(kind: PointerKind, at: Point) -> Self {
        Self { kind, at }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Readiness {
    #[default]
    Pending,
    Ready,
    Failed,
}

impl Readiness {
    pub fn label(self) -> &'static str {
        match self {
            Readiness::Pending => "starting…",
            Readiness::Ready => "ready",
            Readiness::Failed => "unavailable",
        }
    }
}

/// What the status panel shows. Only changes on transitions, never per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStatus {
    pub camera: Readiness,
    pub model: Readiness,
    pub drawing: bool,
    pub fps: u32,
    pub last_error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatusAction {
    Camera(Readiness),
    Model(Readiness),
    Drawing(bool),
    Fps(u32),
    Error(String),
}

impl Reducible for SessionStatus {
    type Action = StatusAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use StatusAction::*;
        let mut new = (*self).clone();
        match action {
            Camera(r) => new.camera = r,
            Model(r) => new.model = r,
            Drawing(d) => new.drawing = d,
            Fps(f) => new.fps = f,
            Error(msg) => new.last_error = Some(msg),
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Landmark { x: 0.0, y: 0.0, z: 0.9 };
        let b = Landmark { x: 0.3, y: 0.4, z: -0.2 };
        assert!((a.planar_distance(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn decodes_detector_json_and_takes_first_hand() {
        let raw = r#"{
            "landmarks": [
                [{"x":0.1,"y":0.2,"z":0.0,"visibility":0}],
                [{"x":0.9,"y":0.8,"z":0.0}]
            ],
            "worldLandmarks": [],
            "handedness": []
        }"#;
        let d: Detection = serde_json::from_str(raw).unwrap();
        assert_eq!(d.landmarks.len(), 2);
        let first = d.first_hand().unwrap();
        assert_eq!(first[0], Landmark::new(0.1, 0.2));
    }

    #[test]
    fn empty_result_has_no_hand() {
        let d: Detection = serde_json::from_str(r#"{"landmarks":[]}"#).unwrap();
        assert!(d.first_hand().is_none());
        let d: Detection = serde_json::from_str("{}").unwrap();
        assert!(d.first_hand().is_none());
    }

    #[test]
    fn short_hand_yields_no_pinch_points() {
        let hand = vec![Landmark::default(); THUMB_TIP + 1];
        assert!(pinch_points(&hand).is_none());
        let hand = vec![Landmark::default(); LANDMARK_COUNT];
        assert!(pinch_points(&hand).is_some());
    }

    #[test]
    fn reducer_keeps_identity_when_nothing_changes() {
        let s = Rc::new(SessionStatus::default());
        let same = s.clone().reduce(StatusAction::Drawing(false));
        assert!(Rc::ptr_eq(&s, &same));
        let changed = s.reduce(StatusAction::Camera(Readiness::Ready));
        assert_eq!(changed.camera, Readiness::Ready);
    }
}
