//! Window collection with focus and z-order

use std::collections::HashMap;

use crate::apps::AppId;
use crate::desktop::DesktopId;
use super::Window;

/// The authoritative map of all window slots plus the active-window
/// pointer.
///
/// Invariants:
/// - one entry per application id, present for the whole session;
/// - the active window, when set, is open and not minimized;
/// - focusing assigns `max(z) + 1`, so relative stacking of the other
///   windows never changes.
pub struct WindowMap {
    windows: HashMap<AppId, Window>,
    active: Option<AppId>,
}

impl Default for WindowMap {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowMap {
    /// Create slots for every known application
    pub fn new() -> Self {
        let windows = AppId::ALL
            .into_iter()
            .map(|id| (id, Window::new(id)))
            .collect();
        Self {
            windows,
            active: None,
        }
    }

    /// Get a window by application id
    pub fn get(&self, id: AppId) -> &Window {
        &self.windows[&id]
    }

    /// Get a window mutably; the caller is responsible for bumping the
    /// revision via `touch` when it mutates state
    pub(crate) fn get_mut(&mut self, id: AppId) -> &mut Window {
        self.windows.get_mut(&id).expect("slot exists for every app id")
    }

    /// The active (focused) application, if any
    #[inline]
    pub fn active(&self) -> Option<AppId> {
        self.active
    }

    /// Clear the active pointer if it points at `id`
    pub(crate) fn clear_active_if(&mut self, id: AppId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Highest z-index across all windows
    pub fn max_z(&self) -> u32 {
        self.windows.values().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Bring a window to the front and make it active.
    ///
    /// Skips minimized and closed windows (a minimized window can never
    /// be the active one). Returns false without touching any state when
    /// the window is already both topmost and active; repeated clicks
    /// must not churn state.
    pub fn focus(&mut self, id: AppId) -> bool {
        let max_z = self.max_z();
        let window = self.get(id);
        if !window.is_open || window.is_minimized {
            return false;
        }
        if window.z_index == max_z && self.active == Some(id) {
            return false;
        }

        let window = self.get_mut(id);
        window.z_index = max_z + 1;
        window.touch();
        self.active = Some(id);
        true
    }

    /// All windows, unordered
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    /// Windows sorted back-to-front by z-index
    pub fn by_z(&self) -> Vec<&Window> {
        let mut list: Vec<&Window> = self.windows.values().collect();
        list.sort_by_key(|w| w.z_index);
        list
    }

    /// Open windows belonging to a desktop, back-to-front
    pub fn open_on_desktop(&self, desktop: DesktopId) -> Vec<&Window> {
        self.by_z()
            .into_iter()
            .filter(|w| w.is_open && w.desktop == desktop)
            .collect()
    }
}
