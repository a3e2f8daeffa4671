use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlVideoElement, MediaStream, Window};
use yew::prelude::*;

use crate::config::Settings;
use crate::error::AppError;
use crate::frame_loop::FrameLoop;
use crate::media;
use crate::model::{Readiness, SessionStatus, StatusAction};
use crate::state::{FrameRate, SharedStrokes};
use crate::surface::DomPointerSurface;
use crate::translator::Tracker;
use crate::util::{fit_canvas, local_storage};
use crate::vision::Detector;

use super::{
    controls_panel::ControlsPanel, intro_overlay::IntroOverlay, settings_modal::SettingsModal,
    status_panel::StatusPanel, whiteboard::Whiteboard,
};

const INTRO_SEEN_KEY: &str = "aw_intro_seen";

#[derive(Properties, PartialEq, Clone)]
pub struct AirCanvasProps {
    pub settings: Settings,
    pub on_settings_change: Callback<Settings>,
    pub on_settings_reset: Callback<()>,
}

/// Everything the mount effect acquired; released in `teardown`.
struct Session {
    window: Window,
    raf_id: Rc<Cell<Option<i32>>>,
    raf_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    resize_cb: Closure<dyn FnMut()>,
    cancelled: Rc<Cell<bool>>,
    stream: Rc<RefCell<Option<MediaStream>>>,
    detector: Rc<RefCell<Option<Detector>>>,
}

impl Session {
    fn teardown(self) {
        self.cancelled.set(true);
        if let Some(id) = self.raf_id.get() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // The loop closure holds a handle to its own cell.
        self.raf_cb.borrow_mut().take();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref());
        if let Some(stream) = self.stream.borrow_mut().take() {
            media::stop(&stream);
        }
        self.detector.borrow_mut().take();
        info!("tracking session closed");
    }
}

async fn acquire_camera(
    video: HtmlVideoElement,
    slot: Rc<RefCell<Option<MediaStream>>>,
    cancelled: Rc<Cell<bool>>,
    status: UseReducerDispatcher<SessionStatus>,
) {
    let stream = match media::open_camera().await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "camera request failed; drawing by gesture disabled");
            if !cancelled.get() {
                status.dispatch(StatusAction::Camera(Readiness::Failed));
                status.dispatch(StatusAction::Error(e.to_string()));
            }
            return;
        }
    };
    if cancelled.get() {
        media::stop(&stream);
        return;
    }
    let attached = media::attach(&video, &stream).await;
    if cancelled.get() {
        media::stop(&stream);
        return;
    }
    *slot.borrow_mut() = Some(stream);
    match attached {
        Ok(()) => status.dispatch(StatusAction::Camera(Readiness::Ready)),
        Err(e) => {
            error!(error = %e, "camera playback failed");
            status.dispatch(StatusAction::Camera(Readiness::Failed));
            status.dispatch(StatusAction::Error(e.to_string()));
        }
    }
}

async fn load_detector(
    settings: Settings,
    slot: Rc<RefCell<Option<Detector>>>,
    cancelled: Rc<Cell<bool>>,
    status: UseReducerDispatcher<SessionStatus>,
) {
    match Detector::load(&settings).await {
        // Dropping a detector closes it.
        Ok(_) if cancelled.get() => {}
        Ok(detector) => {
            *slot.borrow_mut() = Some(detector);
            status.dispatch(StatusAction::Model(Readiness::Ready));
        }
        Err(e) => {
            error!(error = %e, "hand landmarker failed to load");
            if !cancelled.get() {
                status.dispatch(StatusAction::Model(Readiness::Failed));
                status.dispatch(StatusAction::Error(e.to_string()));
            }
        }
    }
}

fn start_session(
    video_ref: &NodeRef,
    overlay_ref: &NodeRef,
    board_ref: &NodeRef,
    tracker: Rc<RefCell<Tracker>>,
    settings: Rc<RefCell<Settings>>,
    status: UseReducerDispatcher<SessionStatus>,
) -> Result<Session, AppError> {
    let window = web_sys::window().ok_or(AppError::NoWindow)?;
    let video = video_ref
        .cast::<HtmlVideoElement>()
        .ok_or(AppError::MissingElement("video"))?;
    let overlay = overlay_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(AppError::MissingElement("hand-overlay"))?;
    let board = board_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(AppError::MissingElement("whiteboard"))?;

    fit_canvas(&overlay);
    fit_canvas(&board);
    let resize_cb = {
        let overlay = overlay.clone();
        Closure::wrap(Box::new(move || fit_canvas(&overlay)) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

    let cancelled = Rc::new(Cell::new(false));
    let stream = Rc::new(RefCell::new(None));
    let detector = Rc::new(RefCell::new(None));
    spawn_local(acquire_camera(
        video.clone(),
        stream.clone(),
        cancelled.clone(),
        status.clone(),
    ));
    spawn_local(load_detector(
        settings.borrow().clone(),
        detector.clone(),
        cancelled.clone(),
        status.clone(),
    ));

    let frame_loop = FrameLoop {
        video,
        overlay,
        surface: RefCell::new(DomPointerSurface::new(board.clone().into())),
        board,
        detector: detector.clone(),
        tracker,
        settings,
        status,
        painter: RefCell::new(None),
        frame_rate: RefCell::new(FrameRate::default()),
    };

    // RAF loop
    let raf_id = Rc::new(Cell::new(None));
    let raf_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let raf_id = raf_id.clone();
        let raf_cb_loop = raf_cb.clone();
        let window_loop = window.clone();
        *raf_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_loop.tick();
            if let Some(cb) = raf_cb_loop.borrow().as_ref() {
                if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));
    }
    if let Some(cb) = raf_cb.borrow().as_ref() {
        raf_id.set(Some(
            window.request_animation_frame(cb.as_ref().unchecked_ref())?,
        ));
    }
    info!("tracking session started");

    Ok(Session {
        window,
        raf_id,
        raf_cb,
        resize_cb,
        cancelled,
        stream,
        detector,
    })
}

#[function_component(AirCanvas)]
pub fn air_canvas(props: &AirCanvasProps) -> Html {
    let video_ref = use_node_ref();
    let overlay_ref = use_node_ref();
    let board_ref = use_node_ref();
    let status = use_reducer(SessionStatus::default);
    let tracker = use_mut_ref(|| Tracker::new(&props.settings));
    let settings_ref = use_mut_ref(|| props.settings.clone());
    let strokes = use_state(SharedStrokes::default);
    let board_revision = use_state(|| 0_u32);
    let open_settings = use_state(|| false);
    let show_intro = use_state(|| {
        local_storage()
            .and_then(|store| store.get_item(INTRO_SEEN_KEY).ok().flatten())
            .is_none()
    });

    // Effect: push settings into the running loop
    {
        let settings_ref = settings_ref.clone();
        let tracker = tracker.clone();
        use_effect_with(props.settings.clone(), move |settings| {
            *settings_ref.borrow_mut() = settings.clone();
            tracker.borrow_mut().configure(settings);
            || ()
        });
    }
    // Main mount effect (camera, model, frame loop)
    {
        let video_ref = video_ref.clone();
        let overlay_ref = overlay_ref.clone();
        let board_ref = board_ref.clone();
        let tracker = tracker.clone();
        let settings_ref = settings_ref.clone();
        let dispatcher = status.dispatcher();
        use_effect_with((), move |_| {
            let session = match start_session(
                &video_ref,
                &overlay_ref,
                &board_ref,
                tracker,
                settings_ref,
                dispatcher,
            ) {
                Ok(s) => Some(s),
                Err(e) => {
                    error!(error = %e, "could not start tracking session");
                    None
                }
            };
            // Cleanup
            move || {
                if let Some(s) = session {
                    s.teardown();
                }
            }
        });
    }

    let clear_cb: Callback<()> = {
        let strokes = strokes.clone();
        let board_revision = board_revision.clone();
        Callback::from(move |()| {
            strokes.0.borrow_mut().clear();
            board_revision.set(board_revision.wrapping_add(1));
        })
    };
    let undo_cb: Callback<()> = {
        let strokes = strokes.clone();
        let board_revision = board_revision.clone();
        Callback::from(move |()| {
            if strokes.0.borrow_mut().undo() {
                board_revision.set(board_revision.wrapping_add(1));
            }
        })
    };
    let open_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(true))
    };
    let close_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(false))
    };
    let hide_intro_cb: Callback<()> = {
        let show_intro = show_intro.clone();
        Callback::from(move |()| {
            show_intro.set(false);
            if let Some(store) = local_storage() {
                let _ = store.set_item(INTRO_SEEN_KEY, "1");
            }
        })
    };
    let show_help_cb: Callback<()> = {
        let show_intro = show_intro.clone();
        Callback::from(move |()| show_intro.set(true))
    };

    let settings = &props.settings;
    let flip = if settings.mirror { "transform:scaleX(-1);" } else { "" };
    let video_style = format!(
        "position:absolute; inset:0; width:100%; height:100%; object-fit:fill; opacity:{}; {}",
        if settings.show_video { "0.45" } else { "0" },
        flip
    );
    let overlay_style = format!(
        "position:absolute; inset:0; width:100%; height:100%; pointer-events:none; {}",
        flip
    );

    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116;">
        <video ref={video_ref.clone()} id="camera" playsinline=true style={video_style}></video>
        <Whiteboard canvas_ref={board_ref.clone()} strokes={(*strokes).clone()} revision={*board_revision} stroke_color={settings.stroke_color.clone()} stroke_width={settings.stroke_width} />
        <canvas ref={overlay_ref.clone()} id="hand-overlay" style={overlay_style}></canvas>
        <StatusPanel camera={status.camera} model={status.model} drawing={status.drawing} fps={status.fps} last_error={status.last_error.clone()} />
        <ControlsPanel on_clear={clear_cb} on_undo={undo_cb} on_show_help={show_help_cb} on_open_settings={open_settings_cb} />
        <IntroOverlay show={*show_intro} hide_intro={hide_intro_cb} />
        <SettingsModal show={*open_settings} settings={settings.clone()} on_change={props.on_settings_change.clone()} on_close={close_settings_cb} on_reset={props.on_settings_reset.clone()} />
    </div>}
}
