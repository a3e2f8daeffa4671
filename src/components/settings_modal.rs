use crate::config::Settings;
use crate::state::LostHandPolicy;
use yew::prelude::*;

static PEN_COLORS: [&str; 5] = ["#f0f6fc", "#58a6ff", "#2ea043", "#f0883e", "#f85149"];
static PEN_WIDTHS: [(&str, f64); 3] = [("Thin", 2.0), ("Medium", 4.0), ("Thick", 8.0)];

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    // Emits a copy of the current settings with one edit applied.
    let edit = |f: fn(&mut Settings)| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = current.clone();
            f(&mut next);
            cb.emit(next);
        })
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_skeleton_cb = edit(|s| s.show_skeleton = !s.show_skeleton);
    let toggle_video_cb = edit(|s| s.show_video = !s.show_video);
    let toggle_mirror_cb = edit(|s| s.mirror = !s.mirror);
    let toggle_release_cb = edit(|s| {
        s.lost_hand_policy = match s.lost_hand_policy {
            LostHandPolicy::Hold => LostHandPolicy::Release,
            LostHandPolicy::Release => LostHandPolicy::Hold,
        }
    });
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Restore every setting to its default?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };

    let swatches = PEN_COLORS.iter().map(|color| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        let selected = current.stroke_color == *color;
        let onclick = Callback::from(move |_: MouseEvent| {
            let mut next = current.clone();
            next.stroke_color = color.to_string();
            cb.emit(next);
        });
        let border = if selected { "#ffffff" } else { "#30363d" };
        html! { <button {onclick} title={*color} style={format!("width:26px; height:26px; border-radius:50%; background:{}; border:2px solid {};", color, border)}></button> }
    });
    let widths = PEN_WIDTHS.iter().map(|(label, width)| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        let selected = current.stroke_width == *width;
        let width = *width;
        let onclick = Callback::from(move |_: MouseEvent| {
            let mut next = current.clone();
            next.stroke_width = width;
            cb.emit(next);
        });
        let weight = if selected { "700" } else { "400" };
        html! { <button {onclick} style={format!("flex:1; font-weight:{};", weight)}>{ *label }</button> }
    });

    let s = &props.settings;
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.show_skeleton} onclick={toggle_skeleton_cb} />
                    <span>{"Show hand skeleton"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.show_video} onclick={toggle_video_cb} />
                    <span>{"Show camera preview"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.mirror} onclick={toggle_mirror_cb} />
                    <span>{"Mirror camera"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.lost_hand_policy == LostHandPolicy::Release} onclick={toggle_release_cb} />
                    <span>{"Lift pen when the hand leaves the frame"}</span>
                </label>
            </div>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <span style="font-size:13px; opacity:0.8;">{"Pen"}</span>
                <div style="display:flex; gap:8px;">{ for swatches }</div>
                <div style="display:flex; gap:6px;">{ for widths }</div>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Reset settings"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{ format!("Pinch threshold {:.2} (normalized frame units).", s.pinch_threshold) }</div>
        </div>
    </div>}
}
