mod components;
mod config;
mod error;
mod frame_loop;
mod media;
mod model;
mod state;
mod surface;
mod translator;
mod util;
mod vision;

use components::app::App;

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<App>::new().render();
}
