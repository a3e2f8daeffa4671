// Two-state pinch machine; replaces a loose `was_pinching` flag.
use serde::{Deserialize, Serialize};

use crate::model::PointerKind;

/// Normalized thumb-to-index distance below which the hand counts as pinching.
pub const PINCH_THRESHOLD: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinchState {
    #[default]
    Idle,
    Drawing,
}

/// Per-frame reading of the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    Pinching,
    Open,
    /// No hand in this frame.
    Unknown,
}

/// What to do with an `Unknown` frame while a stroke is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LostHandPolicy {
    /// Keep the current state; the stroke resumes when the hand returns.
    #[default]
    Hold,
    /// Lift the pen at the last known fingertip position.
    Release,
}

/// Strict comparison: exactly `threshold` is not a pinch.
pub fn classify(distance: f64, threshold: f64) -> Observation {
    if distance < threshold {
        Observation::Pinching
    } else {
        Observation::Open
    }
}

pub fn transition(
    prev: PinchState,
    obs: Observation,
    policy: LostHandPolicy,
) -> (PinchState, Option<PointerKind>) {
    use Observation::*;
    use PinchState::*;
    match (prev, obs) {
        (Idle, Pinching) => (Drawing, Some(PointerKind::Down)),
        (Drawing, Pinching) => (Drawing, Some(PointerKind::Move)),
        (Drawing, Open) => (Idle, Some(PointerKind::Up)),
        (Idle, Open) => (Idle, Some(PointerKind::Move)),
        (Drawing, Unknown) => match policy {
            LostHandPolicy::Hold => (Drawing, None),
            LostHandPolicy::Release => (Idle, Some(PointerKind::Up)),
        },
        (Idle, Unknown) => (Idle, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_pinches() {
        for d in [0.0, 0.01, 0.02, 0.049, 0.049_999_9] {
            assert_eq!(classify(d, PINCH_THRESHOLD), Observation::Pinching, "{d}");
        }
    }

    #[test]
    fn threshold_and_above_is_open() {
        for d in [0.05, 0.050_000_1, 0.2, 1.13] {
            assert_eq!(classify(d, PINCH_THRESHOLD), Observation::Open, "{d}");
        }
    }

    #[test]
    fn full_transition_table() {
        let hold = LostHandPolicy::Hold;
        use Observation::*;
        use PinchState::*;
        assert_eq!(transition(Idle, Pinching, hold), (Drawing, Some(PointerKind::Down)));
        assert_eq!(transition(Drawing, Pinching, hold), (Drawing, Some(PointerKind::Move)));
        assert_eq!(transition(Drawing, Open, hold), (Idle, Some(PointerKind::Up)));
        assert_eq!(transition(Idle, Open, hold), (Idle, Some(PointerKind::Move)));
        assert_eq!(transition(Idle, Unknown, hold), (Idle, None));
        assert_eq!(transition(Drawing, Unknown, hold), (Drawing, None));
    }

    #[test]
    fn release_policy_lifts_pen_once() {
        let release = LostHandPolicy::Release;
        let (s, ev) = transition(PinchState::Drawing, Observation::Unknown, release);
        assert_eq!((s, ev), (PinchState::Idle, Some(PointerKind::Up)));
        let (s, ev) = transition(s, Observation::Unknown, release);
        assert_eq!((s, ev), (PinchState::Idle, None));
    }

    #[test]
    fn policy_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LostHandPolicy::Release).unwrap(), "\"release\"");
        let p: LostHandPolicy = serde_json::from_str("\"hold\"").unwrap();
        assert_eq!(p, LostHandPolicy::Hold);
    }
}
