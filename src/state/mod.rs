pub mod frame_rate;
pub mod pinch;
pub mod strokes;

pub use frame_rate::FrameRate;
pub use pinch::{LostHandPolicy, PinchState};
pub use strokes::{SharedStrokes, StrokeBook};
