use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub hide_intro: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let hide_cb = props.hide_intro.clone();
    let start_btn = Callback::from(move |_| hide_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4; z-index:40;">
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{"Air Whiteboard"}</h2>
            <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{"Draw in the air with your webcam."}</p>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"Allow camera access when the browser asks."}</li>
                <li>{"Hold one hand up; the skeleton overlay shows what the tracker sees."}</li>
                <li>{"Pinch thumb and index fingertip together to put the pen down."}</li>
                <li>{"Move while pinching to draw; open your fingers to lift the pen."}</li>
                <li>{"The mouse draws too. Undo removes the last stroke."}</li>
            </ul>
            <div style="display:flex; gap:12px; justify-content:center; margin-top:8px;">
                <button onclick={start_btn}>{"Start drawing"}</button>
            </div>
            <div style="margin-top:12px; font-size:11px; opacity:0.6; text-align:center;">{"Tip: good lighting and a plain background make tracking steadier."}</div>
        </div>
    }
}
