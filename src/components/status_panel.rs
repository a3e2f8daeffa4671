use crate::model::Readiness;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusPanelProps {
    pub camera: Readiness,
    pub model: Readiness,
    pub drawing: bool,
    pub fps: u32,
    pub last_error: Option<String>,
}

fn readiness_color(r: Readiness) -> &'static str {
    match r {
        Readiness::Pending => "#d29922",
        Readiness::Ready => "#2ea043",
        Readiness::Failed => "#f85149",
    }
}

#[function_component]
pub fn StatusPanel(props: &StatusPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:90px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let (pen_label, pen_color) = if props.drawing {
        ("drawing", "#58a6ff")
    } else {
        ("hover", "#8b949e")
    };
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px; z-index:10;">
            <div style={row_style}>
                <span style={icon_style}>{"📷"}</span>
                <span style={label_style}>{"Camera"}</span>
                <span style={format!("{} color:{};", value_style, readiness_color(props.camera))}>{ props.camera.label() }</span>
            </div>
            <div style={row_style}>
                <span style={icon_style}>{"✋"}</span>
                <span style={label_style}>{"Hand model"}</span>
                <span style={format!("{} color:{};", value_style, readiness_color(props.model))}>{ props.model.label() }</span>
            </div>
            <div style={row_style}>
                <span style={icon_style}>{"✏"}</span>
                <span style={label_style}>{"Pen"}</span>
                <span style={format!("{} color:{};", value_style, pen_color)}>{ pen_label }</span>
            </div>
            <div style={row_style}>
                <span style={icon_style}>{"⏱"}</span>
                <span style={label_style}>{"FPS"}</span>
                <span style={value_style}>{ props.fps }</span>
            </div>
            { if let Some(err) = &props.last_error { html!{ <div style="font-size:11px; line-height:1.3; max-width:260px; background:#1c2128; border:1px solid #f85149; padding:4px 6px; border-radius:6px;">{ err.clone() }</div> } } else { html!{} } }
        </div>
    }
}
