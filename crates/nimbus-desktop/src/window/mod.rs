//! Window state machine types
//!
//! One window slot exists per application id for the whole session;
//! "closed" means `is_open == false`, never absence.

mod map;
mod region;
#[allow(clippy::module_inception)]
mod window;

pub use map::WindowMap;
pub use region::ResizeEdge;
pub use window::{Phase, Window};

/// Minimum window width enforced by every resize path
pub const MIN_WINDOW_WIDTH: f32 = 300.0;

/// Minimum window height enforced by every resize path
pub const MIN_WINDOW_HEIGHT: f32 = 200.0;
