//! Geometry primitives for window placement
//!
//! Screen-space coordinates: origin top-left, y grows downward.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
