//! Per-frame work: detect, redraw the skeleton, translate, dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};
use yew::functional::UseReducerDispatcher;

use crate::config::Settings;
use crate::model::{Detection, SessionStatus, StatusAction};
use crate::state::frame_rate::FrameRate;
use crate::surface::{DomPointerSurface, PointerSurface};
use crate::translator::Tracker;
use crate::util::{canvas_size, context_2d, now_ms};
use crate::vision::{Detector, SkeletonPainter};

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

pub struct FrameLoop {
    pub video: HtmlVideoElement,
    pub overlay: HtmlCanvasElement,
    pub board: HtmlCanvasElement,
    pub detector: Rc<RefCell<Option<Detector>>>,
    pub tracker: Rc<RefCell<Tracker>>,
    pub settings: Rc<RefCell<Settings>>,
    pub status: UseReducerDispatcher<SessionStatus>,
    pub surface: RefCell<DomPointerSurface>,
    pub painter: RefCell<Option<SkeletonPainter>>,
    pub frame_rate: RefCell<FrameRate>,
}

impl FrameLoop {
    pub fn tick(&self) {
        let now = now_ms();
        if let Some(fps) = self.frame_rate.borrow_mut().tick(now) {
            self.status.dispatch(StatusAction::Fps(fps));
        }
        let ctx = match context_2d(&self.overlay) {
            Ok(c) => c,
            Err(_) => return,
        };
        let w = self.overlay.width() as f64;
        let h = self.overlay.height() as f64;
        ctx.clear_rect(0.0, 0.0, w, h);

        let detector = self.detector.borrow();
        let Some(detector) = detector.as_ref() else {
            return;
        };
        if self.video.ready_state() < HAVE_CURRENT_DATA {
            return;
        }
        let detection = detector.detect(&self.video, now).unwrap_or_else(|e| {
            warn!(error = %e, "detection failed for frame");
            Detection::default()
        });
        let hand = detection.first_hand();
        let settings = self.settings.borrow();

        if settings.show_skeleton {
            if let Some(hand) = hand {
                let mut painter = self.painter.borrow_mut();
                let painter = painter.get_or_insert_with(|| SkeletonPainter::new(&ctx));
                if let Err(e) = painter.draw(hand, &settings) {
                    warn!(error = %e, "skeleton overlay failed");
                }
            }
        }

        let mut tracker = self.tracker.borrow_mut();
        let was_drawing = tracker.is_drawing();
        let action = tracker.step(hand, canvas_size(&self.board));
        if tracker.is_drawing() != was_drawing {
            self.status.dispatch(StatusAction::Drawing(tracker.is_drawing()));
        }
        if let Some(action) = action {
            self.surface.borrow_mut().apply(action);
        }
    }
}
