use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};
use yew::prelude::*;

use crate::model::Point;
use crate::state::strokes::StrokeStyle;
use crate::state::{SharedStrokes, StrokeBook};
use crate::util::{context_2d, fit_canvas};

#[derive(Properties, PartialEq, Clone)]
pub struct WhiteboardProps {
    pub canvas_ref: NodeRef,
    pub strokes: SharedStrokes,
    /// Bumped by the parent after clear/undo to force a repaint.
    pub revision: u32,
    pub stroke_color: String,
    pub stroke_width: f64,
}

fn apply_pen(ctx: &CanvasRenderingContext2d, style: &StrokeStyle) {
    ctx.set_stroke_style_str(&style.color);
    ctx.set_fill_style_str(&style.color);
    ctx.set_line_width(style.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
}

fn dot(ctx: &CanvasRenderingContext2d, at: Point, style: &StrokeStyle) {
    apply_pen(ctx, style);
    ctx.begin_path();
    ctx.arc(at.x, at.y, style.width * 0.5, 0.0, std::f64::consts::PI * 2.0)
        .ok();
    ctx.fill();
}

fn segment(ctx: &CanvasRenderingContext2d, from: Point, to: Point, style: &StrokeStyle) {
    apply_pen(ctx, style);
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
}

fn repaint(canvas: &HtmlCanvasElement, book: &StrokeBook) {
    let Ok(ctx) = context_2d(canvas) else {
        return;
    };
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    for stroke in book.iter() {
        match stroke.points.as_slice() {
            [] => {}
            [only] => dot(&ctx, *only, &stroke.style),
            [first, rest @ ..] => {
                apply_pen(&ctx, &stroke.style);
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                ctx.stroke();
            }
        }
    }
}

/// Canvas-relative position of a pointer event.
fn event_point(canvas: &HtmlCanvasElement, e: &PointerEvent) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

/// Freehand drawing surface. Real pointers and gesture-synthesized events go
/// through the same listeners; strokes are keyed by pointer id.
#[function_component(Whiteboard)]
pub fn whiteboard(props: &WhiteboardProps) -> Html {
    let style_ref = use_mut_ref(|| StrokeStyle {
        color: props.stroke_color.clone(),
        width: props.stroke_width,
    });

    // Effect: pen style
    {
        let style_ref = style_ref.clone();
        let color = props.stroke_color.clone();
        let width = props.stroke_width;
        use_effect_with((color, width), move |(color, width)| {
            *style_ref.borrow_mut() = StrokeStyle {
                color: color.clone(),
                width: *width,
            };
            || ()
        });
    }
    // Effect: repaint after clear/undo
    {
        let canvas_ref = props.canvas_ref.clone();
        let strokes = props.strokes.clone();
        use_effect_with(props.revision, move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                repaint(&canvas, &strokes.0.borrow());
            }
            || ()
        });
    }
    // Main mount effect (listeners)
    {
        let canvas_ref = props.canvas_ref.clone();
        let strokes = props.strokes.clone();
        let style_ref = style_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let mut listeners: Vec<(&'static str, Closure<dyn FnMut(PointerEvent)>)> = Vec::new();
            let mut resize_cb: Option<Closure<dyn FnMut()>> = None;

            if let Some(canvas) = canvas.clone() {
                fit_canvas(&canvas);
                let book: Rc<RefCell<StrokeBook>> = strokes.0.clone();

                let down_cb = {
                    let canvas = canvas.clone();
                    let book = book.clone();
                    let style_ref = style_ref.clone();
                    Closure::wrap(Box::new(move |e: PointerEvent| {
                        let at = event_point(&canvas, &e);
                        let style = style_ref.borrow().clone();
                        if book.borrow_mut().begin(e.pointer_id(), at, style.clone()) {
                            if let Ok(ctx) = context_2d(&canvas) {
                                dot(&ctx, at, &style);
                            }
                        }
                        e.prevent_default();
                    }) as Box<dyn FnMut(_)>)
                };
                let move_cb = {
                    let canvas = canvas.clone();
                    let book = book.clone();
                    Closure::wrap(Box::new(move |e: PointerEvent| {
                        let at = event_point(&canvas, &e);
                        let mut book = book.borrow_mut();
                        if let Some(from) = book.extend(e.pointer_id(), at) {
                            let style = style_ref.borrow();
                            if let Ok(ctx) = context_2d(&canvas) {
                                segment(&ctx, from, at, &style);
                            }
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                let up_cb = {
                    let book = book.clone();
                    Closure::wrap(Box::new(move |e: PointerEvent| {
                        book.borrow_mut().end(e.pointer_id());
                    }) as Box<dyn FnMut(_)>)
                };
                let leave_cb = {
                    let book = book.clone();
                    Closure::wrap(Box::new(move |e: PointerEvent| {
                        // Synthetic gesture events never leave; only real pointers end here.
                        if e.is_trusted() {
                            book.borrow_mut().end(e.pointer_id());
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                listeners.push(("pointerdown", down_cb));
                listeners.push(("pointermove", move_cb));
                listeners.push(("pointerup", up_cb));
                listeners.push(("pointerleave", leave_cb));
                for (name, cb) in &listeners {
                    canvas
                        .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
                        .ok();
                }

                let cb = {
                    let canvas = canvas.clone();
                    Closure::wrap(Box::new(move || {
                        fit_canvas(&canvas);
                        repaint(&canvas, &book.borrow());
                    }) as Box<dyn FnMut()>)
                };
                if let Some(w) = &window {
                    w.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
                        .ok();
                }
                resize_cb = Some(cb);
            }
            // Cleanup
            move || {
                if let Some(canvas) = &canvas {
                    for (name, cb) in &listeners {
                        let _ = canvas
                            .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                    }
                }
                if let (Some(w), Some(cb)) = (&window, &resize_cb) {
                    let _ = w.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
                }
            }
        });
    }

    html! {
        <canvas ref={props.canvas_ref.clone()} id="whiteboard" style="position:absolute; inset:0; width:100%; height:100%; touch-action:none; cursor:crosshair;"></canvas>
    }
}
