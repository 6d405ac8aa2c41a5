//! Drag state for pointer operations

use crate::apps::AppId;
use crate::math::{Rect, Vec2};
use crate::window::ResizeEdge;

/// Current pointer interaction.
///
/// Both variants capture the window geometry and pointer position at
/// drag start; movement is always applied as a delta from that capture,
/// never incrementally, so dropped pointer events cannot accumulate
/// error.
#[derive(Clone, Debug)]
pub enum DragState {
    /// Moving a window by its title region
    Move {
        id: AppId,
        start_pointer: Vec2,
        start_bounds: Rect,
    },
    /// Resizing a window from an edge or corner hot-zone
    Resize {
        id: AppId,
        edge: ResizeEdge,
        start_pointer: Vec2,
        start_bounds: Rect,
    },
}

impl DragState {
    /// Check if this is a window move operation
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, DragState::Move { .. })
    }

    /// Check if this is a window resize operation
    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DragState::Resize { .. })
    }

    /// The window being dragged
    pub fn window_id(&self) -> AppId {
        match self {
            DragState::Move { id, .. } => *id,
            DragState::Resize { id, .. } => *id,
        }
    }
}
