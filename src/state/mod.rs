pub mod broadcast;
pub mod geometry;
pub mod gesture;
pub mod zoom;

pub use broadcast::{PaintScheduler, apply_to_targets, transform_value};
pub use gesture::{GestureController, GesturePhase, TapTracker};
pub use zoom::ZoomState;
