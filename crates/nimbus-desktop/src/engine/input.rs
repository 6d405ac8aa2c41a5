//! Pointer drag and resize handling
//!
//! Pointer positions are screen coordinates. A drag exists from
//! pointer-down to pointer-up; deltas are always applied against the
//! geometry captured at drag start.

use crate::apps::AppId;
use crate::input::{apply_resize, DragState};
use crate::math::Vec2;
use crate::window::ResizeEdge;
use super::DesktopShell;

impl DesktopShell {
    /// Begin moving a window from its title region.
    ///
    /// Focuses the window first. Disabled while maximized.
    pub fn start_move_drag(&mut self, id: AppId, pointer: Vec2, now_ms: f64) {
        {
            let window = self.windows.get(id);
            if !window.is_open || window.is_maximized {
                return;
            }
        }
        self.focus_window(id, now_ms);
        let bounds = self.windows.get(id).bounds;
        self.input.start_move(id, pointer, bounds);
    }

    /// Begin resizing a window from an edge or corner hot-zone.
    ///
    /// Focuses the window first. Disabled while maximized.
    pub fn start_resize_drag(&mut self, id: AppId, edge: ResizeEdge, pointer: Vec2, now_ms: f64) {
        {
            let window = self.windows.get(id);
            if !window.is_open || window.is_maximized {
                return;
            }
        }
        self.focus_window(id, now_ms);
        let bounds = self.windows.get(id).bounds;
        self.input.start_resize(id, edge, pointer, bounds);
    }

    /// Apply pointer movement to the live drag, if any
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        let drag = match self.input.drag_state() {
            Some(drag) => drag.clone(),
            None => return,
        };

        match drag {
            DragState::Move {
                id,
                start_pointer,
                start_bounds,
            } => {
                let delta = pointer - start_pointer;
                let mut pos = start_bounds.position() + delta;
                // The title region must stay reachable
                pos.y = pos.y.max(0.0);

                let window = self.windows.get_mut(id);
                window.bounds = window.bounds.at(pos);
                window.touch();
            }
            DragState::Resize {
                id,
                edge,
                start_pointer,
                start_bounds,
            } => {
                let delta = pointer - start_pointer;
                let size = apply_resize(edge, start_bounds.size(), delta);

                let window = self.windows.get_mut(id);
                window.bounds = window.bounds.with_size(size);
                window.touch();
            }
        }
    }

    /// End the live drag operation
    pub fn pointer_up(&mut self) {
        self.input.end_drag();
    }
}
