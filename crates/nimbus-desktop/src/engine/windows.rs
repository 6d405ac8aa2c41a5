//! Window lifecycle operations and taskbar dispatch

use rand::Rng;
use tracing::debug;

use nimbus_process::{ProcessKind, ProcessSpec};

use crate::apps::{AppId, AppPayload};
use crate::desktop::{is_valid_desktop, DesktopId};
use crate::math::Vec2;
use crate::transition::PREVIEW_THROTTLE_MS;
use crate::window::Phase;
use super::DesktopShell;

/// Jitter applied around screen center when placing a freshly opened
/// window, so windows opened in sequence do not overlap exactly
const PLACEMENT_JITTER: f32 = 20.0;

impl DesktopShell {
    /// Open an application's window, or surface it if already open.
    ///
    /// The window adopts the current desktop and leaves the minimized
    /// state. A supplied payload replaces the stored one; `None`
    /// preserves it, so reopening an editor returns to its last
    /// document. Always ends by focusing the window.
    pub fn open_app(&mut self, id: AppId, payload: Option<AppPayload>, now_ms: f64) {
        self.start_menu_open = false;

        let current = self.current_desktop;
        let needs_scatter;
        let was_rendered;
        {
            let window = self.windows.get_mut(id);
            was_rendered = window.is_rendered();
            window.is_open = true;
            window.is_minimized = false;
            window.desktop = current;
            if let Some(payload) = payload {
                window.payload = payload;
            }
            if !was_rendered {
                window.phase = Phase::Entering { frames: 0 };
            } else if matches!(window.phase, Phase::Exiting { .. }) {
                // Reopened mid-exit: run the enter transition again
                window.phase = Phase::Entering { frames: 0 };
            }
            needs_scatter = window.at_default_bounds();
            window.touch();
        }

        if needs_scatter {
            self.scatter_placement(id);
        }

        let pid = id.process_id();
        if self.registry.process(&pid).is_none() {
            let name = self.content.label(id).to_string();
            self.registry.register(ProcessSpec::new(pid.clone(), &name, ProcessKind::App));
        } else {
            self.registry.set_minimized(&pid, false);
        }
        self.samplers.activate(pid, ProcessKind::App, now_ms);

        self.focus_window(id, now_ms);
        self.reconcile_chrome(now_ms);
    }

    /// Place a window near the screen center with a small random offset
    fn scatter_placement(&mut self, id: AppId) {
        let screen = self.screen;
        let jitter_x = self.rng.gen_range(-PLACEMENT_JITTER..PLACEMENT_JITTER);
        let jitter_y = self.rng.gen_range(-PLACEMENT_JITTER..PLACEMENT_JITTER);

        let window = self.windows.get_mut(id);
        let size = window.bounds.size();
        let x = (screen.width / 2.0 - size.width / 2.0 + jitter_x).max(0.0);
        let y = (screen.height / 2.0 - size.height / 2.0 + jitter_y).max(0.0);
        window.bounds = window.bounds.at(Vec2::new(x, y));
        window.touch();
    }

    /// Close a window. The slot keeps its state; the mounted
    /// representation exits over the animation grace period and the
    /// process entry is unregistered at unmount.
    pub fn close_app(&mut self, id: AppId, now_ms: f64) {
        let window = self.windows.get_mut(id);
        if !window.is_open {
            return;
        }
        window.is_open = false;
        if window.is_rendered() {
            window.phase = Phase::Exiting { since_ms: now_ms };
        }
        window.touch();
        self.windows.clear_active_if(id);
    }

    /// Minimize a window, capturing a preview first so the taskbar and
    /// task view have a thumbnail while it is hidden
    pub fn minimize_app(&mut self, id: AppId, now_ms: f64) {
        {
            let window = self.windows.get(id);
            if !window.is_open || window.is_minimized {
                return;
            }
        }
        self.capture_preview(id, now_ms);

        let window = self.windows.get_mut(id);
        window.is_minimized = true;
        window.touch();
        self.windows.clear_active_if(id);
        self.registry.set_minimized(&id.process_id(), true);
    }

    /// Restore a minimized window and bring it to the front
    pub fn restore_app(&mut self, id: AppId, now_ms: f64) {
        {
            let window = self.windows.get_mut(id);
            if !window.is_open || !window.is_minimized {
                return;
            }
            window.is_minimized = false;
            window.touch();
        }
        self.registry.set_minimized(&id.process_id(), false);
        self.focus_window(id, now_ms);
    }

    /// Bring a window to the front and make it active.
    ///
    /// A no-op when the window is already topmost and active. When focus
    /// actually moves, the window losing it gets an opportunistic
    /// preview capture.
    pub fn focus_window(&mut self, id: AppId, now_ms: f64) {
        let previous = self.windows.active();
        if self.windows.focus(id) {
            if let Some(prev) = previous.filter(|&prev| prev != id) {
                self.capture_preview(prev, now_ms);
            }
        }
    }

    /// Toggle between maximized and the exact pre-maximize bounds.
    ///
    /// The maximized geometry itself is the settings-derived work area,
    /// applied at render time; the stored bounds are untouched while
    /// maximized so restore is bit-exact.
    pub fn toggle_maximize(&mut self, id: AppId) {
        let window = self.windows.get_mut(id);
        if !window.is_open {
            return;
        }
        if window.is_maximized {
            window.is_maximized = false;
            if let Some(bounds) = window.restore_bounds.take() {
                window.bounds = bounds;
            }
        } else {
            window.restore_bounds = Some(window.bounds);
            window.is_maximized = true;
        }
        window.touch();
    }

    /// Reassign a window to a desktop without touching open, active, or
    /// z-order state
    pub fn move_window_to_desktop(&mut self, id: AppId, desktop: DesktopId) {
        if !is_valid_desktop(desktop) {
            return;
        }
        let window = self.windows.get_mut(id);
        if window.desktop != desktop {
            window.desktop = desktop;
            window.touch();
        }
    }

    /// Change which desktop is rendered. Window state is untouched.
    pub fn switch_desktop(&mut self, desktop: DesktopId) {
        if is_valid_desktop(desktop) {
            self.current_desktop = desktop;
        }
    }

    /// Taskbar icon click dispatch.
    ///
    /// The branch order matters: a window parked on the other desktop is
    /// relocated and surfaced *before* the active-toggle check, so
    /// clicking its icon never minimizes it blind.
    pub fn handle_taskbar_click(&mut self, id: AppId, now_ms: f64) {
        let (is_open, is_minimized, desktop) = {
            let w = self.windows.get(id);
            (w.is_open, w.is_minimized, w.desktop)
        };

        if !is_open {
            self.open_app(id, None, now_ms);
        } else if is_minimized {
            // Restore onto the current desktop
            {
                let window = self.windows.get_mut(id);
                window.is_minimized = false;
                window.desktop = self.current_desktop;
                window.touch();
            }
            self.registry.set_minimized(&id.process_id(), false);
            self.focus_window(id, now_ms);
        } else if desktop != self.current_desktop {
            self.move_window_to_desktop(id, self.current_desktop);
            self.focus_window(id, now_ms);
        } else if self.windows.active() == Some(id) {
            self.minimize_app(id, now_ms);
        } else {
            self.focus_window(id, now_ms);
        }
    }

    /// Best-effort preview capture, throttled per window.
    ///
    /// Failures are logged and swallowed; the consumer falls back to a
    /// live render.
    pub(crate) fn capture_preview(&mut self, id: AppId, now_ms: f64) {
        {
            let window = self.windows.get(id);
            if !window.is_open || window.is_minimized {
                return;
            }
            if now_ms - window.last_capture_ms < PREVIEW_THROTTLE_MS {
                return;
            }
        }
        self.windows.get_mut(id).last_capture_ms = now_ms;

        match self.capture.capture(id, now_ms) {
            Ok(preview) => {
                let window = self.windows.get_mut(id);
                window.preview = Some(preview);
                window.touch();
            }
            Err(err) => {
                debug!(target: "nimbus::desktop", app = id.slug(), %err, "preview capture failed");
            }
        }
    }
}
