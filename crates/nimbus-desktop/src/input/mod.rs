//! Input routing for window drag and resize
//!
//! Drag state exists only while a pointer interaction is live: it is
//! created on pointer-down and dropped on pointer-up, so no interaction
//! state leaks across unrelated pointer movement.

mod drag;
mod router;

pub use drag::DragState;
pub use router::InputRouter;

use crate::math::{Size, Vec2};
use crate::window::{ResizeEdge, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

/// New size after applying a resize drag's pointer delta.
///
/// Width follows the east delta, height the south delta, each clamped to
/// the window minimum; a resize can never produce sub-minimum
/// dimensions.
pub fn apply_resize(edge: ResizeEdge, start_size: Size, delta: Vec2) -> Size {
    let mut size = start_size;
    if edge.affects_width() {
        size.width = (start_size.width + delta.x).max(MIN_WINDOW_WIDTH);
    }
    if edge.affects_height() {
        size.height = (start_size.height + delta.y).max(MIN_WINDOW_HEIGHT);
    }
    size
}
