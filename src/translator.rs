//! Gesture translation: one hand reading per frame in, at most one pointer
//! action out.

use tracing::debug;

use crate::config::Settings;
use crate::model::{CanvasSize, Landmark, Point, PointerAction, pinch_points};
use crate::state::pinch::{Observation, PINCH_THRESHOLD, classify, transition};
use crate::state::{LostHandPolicy, PinchState};

/// Maps a normalized landmark to canvas pixels. With `mirror` the x axis is
/// flipped to line up with a mirrored camera preview; y is never flipped.
pub fn to_screen(landmark: &Landmark, size: CanvasSize, mirror: bool) -> Point {
    let nx = if mirror { 1.0 - landmark.x } else { landmark.x };
    Point::new(nx * size.width, landmark.y * size.height)
}

/// Owns the pinch state for the lifetime of a frame loop.
#[derive(Debug, Clone)]
pub struct Tracker {
    state: PinchState,
    last_point: Option<Point>,
    threshold: f64,
    mirror: bool,
    policy: LostHandPolicy,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            state: PinchState::Idle,
            last_point: None,
            threshold: PINCH_THRESHOLD,
            mirror: true,
            policy: LostHandPolicy::Hold,
        }
    }
}

impl Tracker {
    pub fn new(settings: &Settings) -> Self {
        let mut t = Self::default();
        t.configure(settings);
        t
    }

    /// Applies new settings without touching the pinch state.
    pub fn configure(&mut self, settings: &Settings) {
        self.threshold = settings.pinch_threshold;
        self.mirror = settings.mirror;
        self.policy = settings.lost_hand_policy;
    }

    #[cfg(test)]
    pub fn state(&self) -> PinchState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == PinchState::Drawing
    }

    /// Runs one frame. `hand` is the first detected hand, if any.
    pub fn step(&mut self, hand: Option<&[Landmark]>, size: CanvasSize) -> Option<PointerAction> {
        let (obs, point) = match hand.and_then(pinch_points) {
            Some((thumb, index)) => {
                let distance = thumb.planar_distance(&index);
                (
                    classify(distance, self.threshold),
                    Some(to_screen(&index, size, self.mirror)),
                )
            }
            None => (Observation::Unknown, None),
        };
        if point.is_some() {
            self.last_point = point;
        }
        let (next, kind) = transition(self.state, obs, self.policy);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, ?obs, "pinch transition");
        }
        self.state = next;
        let at = point.or(self.last_point)?;
        kind.map(|k| PointerAction::new(k, at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{INDEX_FINGER_TIP, LANDMARK_COUNT, PointerKind, THUMB_TIP};

    fn hand(thumb: (f64, f64), index: (f64, f64)) -> Vec<Landmark> {
        let mut h = vec![Landmark::new(0.5, 0.9); LANDMARK_COUNT];
        h[THUMB_TIP] = Landmark::new(thumb.0, thumb.1);
        h[INDEX_FINGER_TIP] = Landmark::new(index.0, index.1);
        h
    }

    fn pinched(x: f64) -> Vec<Landmark> {
        hand((x, 0.5), (x + 0.01, 0.5))
    }

    fn open(x: f64) -> Vec<Landmark> {
        hand((x, 0.5), (x + 0.3, 0.5))
    }

    const SIZE: CanvasSize = CanvasSize {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn mirror_maps_edges_and_center() {
        let size = CanvasSize::new(640.0, 480.0);
        assert_eq!(to_screen(&Landmark::new(0.0, 0.0), size, true).x, 640.0);
        assert_eq!(to_screen(&Landmark::new(1.0, 0.0), size, true).x, 0.0);
        assert_eq!(to_screen(&Landmark::new(0.5, 0.0), size, true).x, 320.0);
        assert_eq!(to_screen(&Landmark::new(0.25, 1.0), size, false), Point::new(160.0, 480.0));
    }

    #[test]
    fn mapping_is_deterministic() {
        let lm = Landmark::new(0.37, 0.61);
        let a = to_screen(&lm, SIZE, true);
        let b = to_screen(&lm, SIZE, true);
        assert_eq!(a, b);
    }

    #[test]
    fn close_pinch_emits_down_at_mirrored_index_tip() {
        let mut t = Tracker::default();
        let h = hand((0.50, 0.50), (0.52, 0.50));
        let action = t.step(Some(&h), SIZE).unwrap();
        assert_eq!(action.kind, PointerKind::Down);
        assert!((action.at.x - 480.0).abs() < 1e-9);
        assert!((action.at.y - 400.0).abs() < 1e-9);
        assert!(t.is_drawing());
    }

    #[test]
    fn wide_hand_only_hovers() {
        let mut t = Tracker::default();
        let h = hand((0.10, 0.10), (0.90, 0.90));
        for _ in 0..10 {
            let a = t.step(Some(&h), SIZE).unwrap();
            assert_eq!(a.kind, PointerKind::Move);
        }
        assert_eq!(t.state(), PinchState::Idle);
    }

    #[test]
    fn pinch_release_pinch_sequence() {
        let mut t = Tracker::default();
        let frames = [
            pinched(0.2),
            pinched(0.25),
            pinched(0.3),
            open(0.3),
            open(0.35),
            pinched(0.4),
            pinched(0.45),
            open(0.5),
        ];
        let kinds: Vec<PointerKind> = frames
            .iter()
            .filter_map(|f| t.step(Some(f), SIZE))
            .map(|a| a.kind)
            .collect();
        use PointerKind::*;
        assert_eq!(kinds, vec![Down, Move, Move, Up, Move, Down, Move, Up]);
        for pair in kinds.windows(2) {
            assert!(!(pair[0] == Down && pair[1] == Down));
            assert!(!(pair[0] == Up && pair[1] == Up));
        }
    }

    #[test]
    fn lost_hand_holds_stroke_by_default() {
        let mut t = Tracker::default();
        t.step(Some(&pinched(0.2)), SIZE);
        assert_eq!(t.step(None, SIZE), None);
        assert!(t.is_drawing());
        let resumed = t.step(Some(&pinched(0.3)), SIZE).unwrap();
        assert_eq!(resumed.kind, PointerKind::Move);
    }

    #[test]
    fn lost_hand_releases_at_last_point_when_configured() {
        let settings = Settings {
            lost_hand_policy: LostHandPolicy::Release,
            ..Settings::default()
        };
        let mut t = Tracker::new(&settings);
        let down = t.step(Some(&pinched(0.2)), SIZE).unwrap();
        let up = t.step(None, SIZE).unwrap();
        assert_eq!(up.kind, PointerKind::Up);
        assert_eq!(up.at, down.at);
        assert_eq!(t.step(None, SIZE), None);
        assert!(!t.is_drawing());
    }

    #[test]
    fn truncated_hand_counts_as_lost() {
        let mut t = Tracker::default();
        let short = vec![Landmark::default(); 5];
        assert_eq!(t.step(Some(&short), SIZE), None);
    }

    #[test]
    fn configure_keeps_state() {
        let mut t = Tracker::default();
        t.step(Some(&pinched(0.2)), SIZE);
        t.configure(&Settings {
            mirror: false,
            ..Settings::default()
        });
        assert!(t.is_drawing());
        let a = t.step(Some(&pinched(0.2)), SIZE).unwrap();
        assert!((a.at.x - 210.0).abs() < 1e-9);
    }
}
