// Whiteboard stroke storage.
use std::cell::RefCell;
use std::rc::Rc;

use crate::model::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub style: StrokeStyle,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Finished strokes plus the one currently under the pen. The active stroke
/// belongs to the pointer id that began it; other pointers cannot touch it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeBook {
    finished: Vec<Stroke>,
    active: Option<(i32, Stroke)>,
}

impl StrokeBook {
    /// Starts a stroke for `pointer_id`. An unterminated stroke of the same
    /// pointer is closed first; a down from another pointer while one is
    /// drawing is refused and returns `false`.
    pub fn begin(&mut self, pointer_id: i32, at: Point, style: StrokeStyle) -> bool {
        if self.active.as_ref().is_some_and(|(owner, _)| *owner != pointer_id) {
            return false;
        }
        self.end(pointer_id);
        self.active = Some((
            pointer_id,
            Stroke {
                style,
                points: vec![at],
            },
        ));
        true
    }

    /// Extends the active stroke and returns the segment start. Hover moves
    /// (no active stroke) and moves of other pointers return `None`.
    pub fn extend(&mut self, pointer_id: i32, at: Point) -> Option<Point> {
        let (owner, stroke) = self.active.as_mut()?;
        if *owner != pointer_id {
            return None;
        }
        let from = stroke.last();
        stroke.points.push(at);
        from
    }

    pub fn end(&mut self, pointer_id: i32) {
        match self.active.take() {
            Some((owner, stroke)) if owner == pointer_id => self.finished.push(stroke),
            other => self.active = other,
        }
    }

    #[cfg(test)]
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn clear(&mut self) {
        self.finished.clear();
        self.active = None;
    }

    /// Drops the most recent finished stroke.
    pub fn undo(&mut self) -> bool {
        self.finished.pop().is_some()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.finished.len() + usize::from(self.active.is_some())
    }

    /// Finished strokes in order, then the active one.
    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.finished
            .iter()
            .chain(self.active.iter().map(|(_, stroke)| stroke))
    }
}

/// Handle passed between components; equality is identity.
#[derive(Clone, Debug, Default)]
pub struct SharedStrokes(pub Rc<RefCell<StrokeBook>>);

impl PartialEq for SharedStrokes {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> StrokeStyle {
        StrokeStyle {
            color: "#fff".into(),
            width: 4.0,
        }
    }

    const MOUSE: i32 = 1;
    const GESTURE: i32 = 4242;

    #[test]
    fn down_move_up_builds_one_stroke() {
        let mut book = StrokeBook::default();
        assert!(book.begin(MOUSE, Point::new(1.0, 1.0), pen()));
        assert_eq!(book.extend(MOUSE, Point::new(2.0, 2.0)), Some(Point::new(1.0, 1.0)));
        assert_eq!(book.extend(MOUSE, Point::new(3.0, 3.0)), Some(Point::new(2.0, 2.0)));
        book.end(MOUSE);
        assert!(!book.is_drawing());
        let strokes: Vec<_> = book.iter().collect();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].points.len(), 3);
    }

    #[test]
    fn hover_moves_are_ignored() {
        let mut book = StrokeBook::default();
        assert_eq!(book.extend(MOUSE, Point::new(5.0, 5.0)), None);
        book.end(MOUSE);
        assert_eq!(book.len(), 0);
    }

    #[test]
    fn begin_closes_open_stroke_of_same_pointer() {
        let mut book = StrokeBook::default();
        book.begin(GESTURE, Point::new(0.0, 0.0), pen());
        book.begin(GESTURE, Point::new(9.0, 9.0), pen());
        book.end(GESTURE);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn other_pointer_cannot_touch_active_stroke() {
        let mut book = StrokeBook::default();
        book.begin(GESTURE, Point::new(0.0, 0.0), pen());
        book.extend(GESTURE, Point::new(1.0, 0.0));

        // mouse hovering, pressing and releasing while the gesture draws
        assert_eq!(book.extend(MOUSE, Point::new(50.0, 50.0)), None);
        assert!(!book.begin(MOUSE, Point::new(60.0, 60.0), pen()));
        book.end(MOUSE);
        assert!(book.is_drawing());

        assert_eq!(book.extend(GESTURE, Point::new(2.0, 0.0)), Some(Point::new(1.0, 0.0)));
        book.end(GESTURE);
        let strokes: Vec<_> = book.iter().collect();
        assert_eq!(strokes.len(), 1);
        assert_eq!(
            strokes[0].points,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)]
        );

        // once released, the mouse may draw
        assert!(book.begin(MOUSE, Point::new(60.0, 60.0), pen()));
        assert_eq!(book.extend(GESTURE, Point::new(3.0, 0.0)), None);
        book.end(MOUSE);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn undo_and_clear() {
        let mut book = StrokeBook::default();
        for i in 0..3 {
            book.begin(MOUSE, Point::new(i as f64, 0.0), pen());
            book.end(MOUSE);
        }
        assert!(book.undo());
        assert_eq!(book.len(), 2);
        book.clear();
        assert_eq!(book.len(), 0);
        assert!(!book.undo());
    }

    #[test]
    fn shared_handles_compare_by_identity() {
        let a = SharedStrokes::default();
        let b = SharedStrokes::default();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
