use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_clear: Callback<()>,
    pub on_undo: Callback<()>,
    pub on_show_help: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let clear_cb = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let undo_cb = {
        let cb = props.on_undo.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let help_cb = {
        let cb = props.on_show_help.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px; z-index:10;">
        <button onclick={undo_cb}>{"Undo stroke"}</button>
        <button onclick={clear_cb}>{"Clear board"}</button>
        <button onclick={settings_cb}>{"Settings"}</button>
        <button onclick={help_cb}>{"Help"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Pinch thumb and index finger to draw"}</div>
    </div>}
}
