//! Task view overlay: window thumbnails and desktop switching
//!
//! The overlay presents exactly two desktop slots and a thumbnail grid
//! of the current desktop's open windows. Like windows, it unmounts a
//! grace period after closing so its exit animation can play.

use crate::apps::AppId;
use crate::desktop::{is_valid_desktop, DesktopId, DESKTOP_COUNT};
use crate::engine::DesktopShell;
use crate::transition::WINDOW_ANIMATION_MS;
use crate::window::Window;

/// Context-menu action on a window thumbnail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskViewAction {
    /// Surface the window and leave the overlay
    Activate,
    /// Reassign the window to a desktop
    MoveToDesktop(DesktopId),
    /// Close the window
    Close,
}

/// One entry of a thumbnail's context menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskViewMenuItem {
    pub action: TaskViewAction,
    pub enabled: bool,
}

/// Overlay open/render state with deferred unmount
pub struct TaskView {
    open: bool,
    rendered: bool,
    closed_at_ms: f64,
    /// Desktop slot a thumbnail drag currently hovers, for drop styling
    drag_over: Option<DesktopId>,
}

impl Default for TaskView {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskView {
    pub fn new() -> Self {
        Self {
            open: false,
            rendered: false,
            closed_at_ms: f64::NEG_INFINITY,
            drag_over: None,
        }
    }

    /// Whether the overlay is logically open
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the overlay is still mounted (open, or exiting)
    #[inline]
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Desktop slot currently hovered by a thumbnail drag
    #[inline]
    pub fn drag_over(&self) -> Option<DesktopId> {
        self.drag_over
    }

    pub fn set_open(&mut self, open: bool, now_ms: f64) {
        if self.open == open {
            return;
        }
        self.open = open;
        if open {
            self.rendered = true;
        } else {
            self.closed_at_ms = now_ms;
            self.drag_over = None;
        }
    }

    /// Advance the deferred unmount
    pub fn tick(&mut self, now_ms: f64) {
        if self.rendered && !self.open && now_ms - self.closed_at_ms >= WINDOW_ANIMATION_MS {
            self.rendered = false;
        }
    }

    /// A thumbnail drag hovers a desktop slot
    pub fn hover_desktop(&mut self, desktop: Option<DesktopId>) {
        self.drag_over = desktop.filter(|&d| is_valid_desktop(d));
    }
}

impl DesktopShell {
    /// Open or close the task view overlay
    pub fn toggle_task_view(&mut self, now_ms: f64) {
        let open = !self.task_view.is_open();
        self.task_view.set_open(open, now_ms);
        self.reconcile_chrome(now_ms);
    }

    /// Open windows of the current desktop, back-to-front, for the
    /// thumbnail grid
    pub fn task_view_thumbnails(&self) -> Vec<&Window> {
        self.windows.open_on_desktop(self.current_desktop)
    }

    /// Drop a dragged thumbnail on a desktop slot. No-op when dropped on
    /// the window's own desktop.
    pub fn task_view_drop(&mut self, id: AppId, desktop: DesktopId) {
        self.task_view.hover_desktop(None);
        if !is_valid_desktop(desktop) || self.windows.get(id).desktop == desktop {
            return;
        }
        self.move_window_to_desktop(id, desktop);
    }

    /// Click a thumbnail: surface the window and dismiss the overlay
    pub fn task_view_select(&mut self, id: AppId, now_ms: f64) {
        self.handle_taskbar_click(id, now_ms);
        self.task_view.set_open(false, now_ms);
        self.reconcile_chrome(now_ms);
    }

    /// Context menu for a thumbnail. Move entries targeting the desktop
    /// currently shown are disabled.
    pub fn task_view_menu(&self, _id: AppId) -> Vec<TaskViewMenuItem> {
        let mut items = vec![TaskViewMenuItem {
            action: TaskViewAction::Activate,
            enabled: true,
        }];
        for desktop in 0..DESKTOP_COUNT {
            items.push(TaskViewMenuItem {
                action: TaskViewAction::MoveToDesktop(desktop),
                enabled: desktop != self.current_desktop,
            });
        }
        items.push(TaskViewMenuItem {
            action: TaskViewAction::Close,
            enabled: true,
        });
        items
    }

    /// Apply a context-menu action to a thumbnail's window
    pub fn task_view_apply(&mut self, id: AppId, action: TaskViewAction, now_ms: f64) {
        match action {
            TaskViewAction::Activate => self.task_view_select(id, now_ms),
            TaskViewAction::MoveToDesktop(desktop) => self.task_view_drop(id, desktop),
            TaskViewAction::Close => self.close_app(id, now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::shell;

    #[test]
    fn test_deferred_unmount() {
        let mut view = TaskView::new();
        view.set_open(true, 0.0);
        assert!(view.is_open());
        assert!(view.is_rendered());

        view.set_open(false, 1_000.0);
        assert!(!view.is_open());
        assert!(view.is_rendered());

        view.tick(1_000.0 + WINDOW_ANIMATION_MS - 1.0);
        assert!(view.is_rendered());

        view.tick(1_000.0 + WINDOW_ANIMATION_MS);
        assert!(!view.is_rendered());
    }

    #[test]
    fn test_reopen_during_exit_stays_rendered() {
        let mut view = TaskView::new();
        view.set_open(true, 0.0);
        view.set_open(false, 100.0);
        view.set_open(true, 200.0);

        view.tick(10_000.0);
        assert!(view.is_open());
        assert!(view.is_rendered());
    }

    #[test]
    fn test_thumbnails_show_current_desktop_only() {
        let mut s = shell(0.0);
        s.open_app(AppId::FileManager, None, 0.0);
        s.open_app(AppId::Gallery, None, 10.0);
        s.move_window_to_desktop(AppId::Gallery, 1);

        let ids: Vec<AppId> = s.task_view_thumbnails().iter().map(|w| w.id).collect();
        assert_eq!(ids, [AppId::FileManager]);

        s.switch_desktop(1);
        let ids: Vec<AppId> = s.task_view_thumbnails().iter().map(|w| w.id).collect();
        assert_eq!(ids, [AppId::Gallery]);
    }

    #[test]
    fn test_drop_on_same_desktop_is_noop() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);
        let revision = s.windows.get(AppId::Gallery).revision();

        s.task_view_drop(AppId::Gallery, 0);
        assert_eq!(s.windows.get(AppId::Gallery).revision(), revision);

        s.task_view_drop(AppId::Gallery, 1);
        assert_eq!(s.windows.get(AppId::Gallery).desktop, 1);
    }

    #[test]
    fn test_menu_disables_move_to_current_desktop() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);

        let menu = s.task_view_menu(AppId::Gallery);
        let move_to_0 = menu
            .iter()
            .find(|item| item.action == TaskViewAction::MoveToDesktop(0))
            .unwrap();
        let move_to_1 = menu
            .iter()
            .find(|item| item.action == TaskViewAction::MoveToDesktop(1))
            .unwrap();
        assert!(!move_to_0.enabled);
        assert!(move_to_1.enabled);

        s.switch_desktop(1);
        let menu = s.task_view_menu(AppId::Gallery);
        assert!(
            menu.iter()
                .find(|item| item.action == TaskViewAction::MoveToDesktop(0))
                .unwrap()
                .enabled
        );
    }

    #[test]
    fn test_select_surfaces_window_and_closes_overlay() {
        let mut s = shell(0.0);
        s.open_app(AppId::FileManager, None, 0.0);
        s.open_app(AppId::Gallery, None, 10.0);
        s.toggle_task_view(20.0);
        assert!(s.task_view.is_open());

        s.task_view_select(AppId::FileManager, 30.0);
        assert_eq!(s.windows.active(), Some(AppId::FileManager));
        assert!(!s.task_view.is_open());
    }

    #[test]
    fn test_task_view_registers_chrome_while_rendered() {
        let mut s = shell(0.0);
        let pid = crate::apps::ChromeId::TaskView.process_id();
        assert!(s.registry.process(&pid).is_none());

        s.toggle_task_view(0.0);
        assert!(s.registry.process(&pid).is_some());

        // Closing keeps it registered through the exit grace period
        s.toggle_task_view(100.0);
        assert!(s.registry.process(&pid).is_some());

        s.tick(100.0 + WINDOW_ANIMATION_MS + 10.0);
        assert!(s.registry.process(&pid).is_none());
    }

    #[test]
    fn test_hover_tracking() {
        let mut view = TaskView::new();
        view.hover_desktop(Some(1));
        assert_eq!(view.drag_over(), Some(1));

        view.hover_desktop(Some(9));
        assert_eq!(view.drag_over(), None);

        view.hover_desktop(Some(0));
        view.set_open(true, 0.0);
        view.set_open(false, 10.0);
        assert_eq!(view.drag_over(), None);
    }
}
