use super::air_canvas::AirCanvas;
use crate::config::{self, Settings};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(config::load);

    // Persist settings changes
    {
        use_effect_with((*settings).clone(), move |s| {
            config::save(s);
            || ()
        });
    }

    let on_change = {
        let settings = settings.clone();
        Callback::from(move |next: Settings| settings.set(next.sanitized()))
    };
    let on_reset = {
        let settings = settings.clone();
        Callback::from(move |()| settings.set(config::reset()))
    };

    html! { <AirCanvas
        settings={(*settings).clone()}
        on_settings_change={on_change}
        on_settings_reset={on_reset}
    /> }
}
