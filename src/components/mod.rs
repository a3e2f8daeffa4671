pub mod air_canvas;
pub mod app;
pub mod controls_panel;
pub mod intro_overlay;
pub mod settings_modal;
pub mod status_panel;
pub mod whiteboard;
