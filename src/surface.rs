//! Adapter between pointer actions and a concrete drawing backend.

use tracing::warn;
use web_sys::{Element, PointerEvent, PointerEventInit};

use crate::error::describe_js;
use crate::model::{PointerAction, PointerKind};

/// Anything that can receive pen input in canvas-pixel coordinates.
pub trait PointerSurface {
    fn pointer_down(&mut self, x: f64, y: f64);
    fn pointer_move(&mut self, x: f64, y: f64);
    fn pointer_up(&mut self, x: f64, y: f64);

    fn apply(&mut self, action: PointerAction) {
        let PointerAction { kind, at } = action;
        match kind {
            PointerKind::Down => self.pointer_down(at.x, at.y),
            PointerKind::Move => self.pointer_move(at.x, at.y),
            PointerKind::Up => self.pointer_up(at.x, at.y),
        }
    }
}

/// Synthetic pointer id, chosen away from the ids browsers hand out for
/// mouse (1) and touch.
const GESTURE_POINTER_ID: i32 = 4242;

/// Client coordinate for a canvas-relative offset. `MouseEventInit` only takes
/// integers, so gesture points land on whole CSS pixels.
fn client_coord(origin: f64, offset: f64) -> i32 {
    (origin + offset).round() as i32
}

/// Dispatches synthetic DOM `PointerEvent`s onto an element, so any backend
/// listening for pointer input can be driven by gestures.
pub struct DomPointerSurface {
    target: Element,
    pressed: bool,
}

impl DomPointerSurface {
    pub fn new(target: Element) -> Self {
        Self {
            target,
            pressed: false,
        }
    }

    fn dispatch(&mut self, kind: PointerKind, x: f64, y: f64) {
        match kind {
            PointerKind::Down => self.pressed = true,
            PointerKind::Up => self.pressed = false,
            PointerKind::Move => {}
        }
        let rect = self.target.get_bounding_client_rect();
        let init = PointerEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_composed(true);
        init.set_pointer_id(GESTURE_POINTER_ID);
        init.set_pointer_type("pen");
        init.set_is_primary(true);
        init.set_client_x(client_coord(rect.left(), x));
        init.set_client_y(client_coord(rect.top(), y));
        init.set_button(if kind == PointerKind::Move { -1 } else { 0 });
        init.set_buttons(u16::from(self.pressed));
        init.set_pressure(if self.pressed { 0.5 } else { 0.0 });
        let event = match PointerEvent::new_with_event_init_dict(kind.event_type(), &init) {
            Ok(ev) => ev,
            Err(e) => {
                warn!(error = %describe_js(&e), "could not build pointer event");
                return;
            }
        };
        if let Err(e) = self.target.dispatch_event(&event) {
            warn!(error = %describe_js(&e), "pointer event dispatch failed");
        }
    }
}

impl PointerSurface for DomPointerSurface {
    fn pointer_down(&mut self, x: f64, y: f64) {
        self.dispatch(PointerKind::Down, x, y);
    }

    fn pointer_move(&mut self, x: f64, y: f64) {
        self.dispatch(PointerKind::Move, x, y);
    }

    fn pointer_up(&mut self, x: f64, y: f64) {
        self.dispatch(PointerKind::Up, x, y);
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;
    use crate::model::Point;

    /// Keeps every action in arrival order.
    #[derive(Default, Debug)]
    pub struct RecordingSurface {
        pub actions: Vec<PointerAction>,
    }

    impl PointerSurface for RecordingSurface {
        fn pointer_down(&mut self, x: f64, y: f64) {
            self.actions
                .push(PointerAction::new(PointerKind::Down, Point::new(x, y)));
        }

        fn pointer_move(&mut self, x: f64, y: f64) {
            self.actions
                .push(PointerAction::new(PointerKind::Move, Point::new(x, y)));
        }

        fn pointer_up(&mut self, x: f64, y: f64) {
            self.actions
                .push(PointerAction::new(PointerKind::Up, Point::new(x, y)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::RecordingSurface;
    use super::*;
    use crate::config::Settings;
    use crate::model::{CanvasSize, INDEX_FINGER_TIP, LANDMARK_COUNT, Landmark, Point, THUMB_TIP};
    use crate::translator::Tracker;

    #[test]
    fn apply_routes_each_kind() {
        let mut s = RecordingSurface::default();
        s.apply(PointerAction::new(PointerKind::Down, Point::new(1.0, 2.0)));
        s.apply(PointerAction::new(PointerKind::Move, Point::new(3.0, 4.0)));
        s.apply(PointerAction::new(PointerKind::Up, Point::new(5.0, 6.0)));
        let kinds: Vec<_> = s.actions.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![PointerKind::Down, PointerKind::Move, PointerKind::Up]);
        assert_eq!(s.actions[2].at, Point::new(5.0, 6.0));
    }

    #[test]
    fn client_coords_round_to_whole_pixels() {
        assert_eq!(client_coord(10.0, 479.6), 490);
        assert_eq!(client_coord(10.25, 479.2), 489);
        assert_eq!(client_coord(0.0, 0.0), 0);
    }

    #[test]
    fn tracker_drives_surface_end_to_end() {
        let mut tracker = Tracker::new(&Settings::default());
        let mut surface = RecordingSurface::default();
        let size = CanvasSize::new(1000.0, 800.0);
        let mut h = vec![Landmark::new(0.5, 0.9); LANDMARK_COUNT];
        h[THUMB_TIP] = Landmark::new(0.50, 0.50);
        h[INDEX_FINGER_TIP] = Landmark::new(0.52, 0.50);
        if let Some(a) = tracker.step(Some(&h), size) {
            surface.apply(a);
        }
        h[INDEX_FINGER_TIP] = Landmark::new(0.80, 0.50);
        if let Some(a) = tracker.step(Some(&h), size) {
            surface.apply(a);
        }
        assert_eq!(surface.actions.len(), 2);
        assert_eq!(surface.actions[0].kind, PointerKind::Down);
        assert_eq!(surface.actions[1].kind, PointerKind::Up);
        assert!((surface.actions[1].at.x - 200.0).abs() < 1e-9);
    }
}
