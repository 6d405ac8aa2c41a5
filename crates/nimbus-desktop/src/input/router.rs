//! Input router state machine

use crate::apps::AppId;
use crate::math::{Rect, Vec2};
use crate::window::ResizeEdge;
use super::DragState;

/// Input router managing the live drag operation
pub struct InputRouter {
    drag: Option<DragState>,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    pub fn new() -> Self {
        Self { drag: None }
    }

    /// Current drag state
    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Whether a drag operation is live
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin a window move
    pub fn start_move(&mut self, id: AppId, pointer: Vec2, bounds: Rect) {
        self.drag = Some(DragState::Move {
            id,
            start_pointer: pointer,
            start_bounds: bounds,
        });
    }

    /// Begin a window resize
    pub fn start_resize(&mut self, id: AppId, edge: ResizeEdge, pointer: Vec2, bounds: Rect) {
        self.drag = Some(DragState::Resize {
            id,
            edge,
            start_pointer: pointer,
            start_bounds: bounds,
        });
    }

    /// End the live drag operation
    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}
