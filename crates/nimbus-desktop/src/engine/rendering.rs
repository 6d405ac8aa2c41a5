//! Render snapshots for the host
//!
//! The shell owns state; the host draws it. Each frame the host asks for
//! [`WindowFrame`]s, windows of the current desktop with their
//! geometry and the visual transform their animation phase implies, and
//! for [`TaskbarButton`]s describing the icon row. Windows parked on the
//! other desktop are omitted entirely, not dimmed.

use crate::apps::AppId;
use crate::math::{Rect, Vec2};
use crate::preview::Preview;
use crate::window::Phase;
use super::DesktopShell;

/// Blur applied to a minimized window's fading representation
const MINIMIZE_BLUR_PX: f32 = 10.0;

/// Scale a minimized window shrinks toward
const MINIMIZE_SCALE: f32 = 0.3;

/// Scale an entering or exiting window holds at the hidden end of its
/// transition
const ENTER_EXIT_SCALE: f32 = 0.9;

/// Transform the renderer should apply on top of a window's bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    /// Translation from the window's layout position
    pub offset: Vec2,
    pub scale: f32,
    pub opacity: f32,
    pub blur_px: f32,
}

impl VisualState {
    const IDENTITY: VisualState = VisualState {
        offset: Vec2::ZERO,
        scale: 1.0,
        opacity: 1.0,
        blur_px: 0.0,
    };
}

/// One window as the renderer should draw it
#[derive(Clone, Debug)]
pub struct WindowFrame {
    pub id: AppId,
    pub title: String,
    /// Layout bounds; the work area when maximized
    pub bounds: Rect,
    pub z_index: u32,
    pub focused: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub visual: VisualState,
    /// Whether the window accepts pointer input (hidden and animating
    /// windows do not)
    pub interactive: bool,
    pub preview: Option<Preview>,
}

/// One taskbar icon with its window's presentation state
#[derive(Clone, Debug)]
pub struct TaskbarButton {
    pub id: AppId,
    pub label: String,
    pub title: String,
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_active: bool,
    pub on_current_desktop: bool,
    /// Hover-card thumbnail, when one was captured
    pub preview: Option<Preview>,
}

impl DesktopShell {
    /// Windows to draw for the current desktop, back-to-front
    pub fn frames(&self) -> Vec<WindowFrame> {
        let work_area = self.settings.taskbar.work_area(self.screen);
        let active = self.windows.active();

        self.windows
            .by_z()
            .into_iter()
            .filter(|w| w.is_rendered() && w.desktop == self.current_desktop)
            .map(|w| {
                let bounds = if w.is_maximized { work_area } else { w.bounds };
                let visual = self.visual_state(w.phase, w.is_minimized, bounds);
                WindowFrame {
                    id: w.id,
                    title: self.window_title(w.id),
                    bounds,
                    z_index: w.z_index,
                    focused: active == Some(w.id),
                    minimized: w.is_minimized,
                    maximized: w.is_maximized,
                    visual,
                    interactive: w.phase == Phase::Steady && !w.is_minimized,
                    preview: w.preview.clone(),
                }
            })
            .collect()
    }

    /// Transform implied by a window's animation phase
    fn visual_state(&self, phase: Phase, minimized: bool, bounds: Rect) -> VisualState {
        if minimized {
            // Shrink toward the taskbar's edge and fade out behind a blur
            let target_y = self
                .settings
                .taskbar
                .minimize_offset_y(self.screen, bounds.height);
            return VisualState {
                offset: Vec2::new(0.0, target_y - bounds.y),
                scale: MINIMIZE_SCALE,
                opacity: 0.0,
                blur_px: MINIMIZE_BLUR_PX,
            };
        }
        match phase {
            Phase::Entering { .. } | Phase::Exiting { .. } => VisualState {
                offset: Vec2::ZERO,
                scale: ENTER_EXIT_SCALE,
                opacity: 0.0,
                blur_px: 0.0,
            },
            Phase::Steady => VisualState::IDENTITY,
            Phase::Hidden => VisualState {
                opacity: 0.0,
                ..VisualState::IDENTITY
            },
        }
    }

    /// The taskbar's icon row, in catalog order
    pub fn taskbar_buttons(&self) -> Vec<TaskbarButton> {
        let active = self.windows.active();
        AppId::ALL
            .into_iter()
            .map(|id| {
                let w = self.windows.get(id);
                TaskbarButton {
                    id,
                    label: self.content.label(id).to_string(),
                    title: self.window_title(id),
                    is_open: w.is_open,
                    is_minimized: w.is_minimized,
                    is_active: active == Some(id),
                    on_current_desktop: w.desktop == self.current_desktop,
                    preview: w.preview.clone(),
                }
            })
            .collect()
    }
}
