//! Command-channel handling and restart revives
//!
//! The task manager (or any other consumer) broadcasts commands on the
//! registry's command channel; the shell is the component that owns the
//! windows and chrome, so it is the one that honors them. Commands
//! arrive through a drainable inbox and are applied during `tick`.

use tracing::debug;

use nimbus_process::{ProcessCommand, ProcessId, ProcessStatus};

use crate::apps::{AppId, ChromeId};
use crate::transition::RESTART_DELAY_MS;
use super::{DesktopShell, PendingRevive};

/// What a pending restart revives once its delay elapses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviveTarget {
    App(AppId),
    Chrome(ChromeId),
}

impl DesktopShell {
    /// Drain broadcast commands and fire any due restart revives
    pub(crate) fn process_commands(&mut self, now_ms: f64) {
        for (pid, command) in self.inbox.drain() {
            self.apply_command(&pid, command, now_ms);
        }

        let mut due = Vec::new();
        self.pending_revives.retain(|pending| {
            if pending.due_ms <= now_ms {
                due.push(pending.target);
                false
            } else {
                true
            }
        });
        for target in due {
            self.revive(target, now_ms);
        }
    }

    fn apply_command(&mut self, pid: &ProcessId, command: ProcessCommand, now_ms: f64) {
        if let Some(app) = pid.app_slug().and_then(AppId::from_slug) {
            self.apply_app_command(app, command, now_ms);
        } else if let Some(chrome) = pid.ui_slug().and_then(ChromeId::from_slug) {
            self.apply_chrome_command(chrome, command, now_ms);
        } else {
            // Kernel and unknown targets: nothing here owns them
            debug!(target: "nimbus::desktop", %pid, ?command, "ignoring command for unowned id");
        }
    }

    fn apply_app_command(&mut self, app: AppId, command: ProcessCommand, now_ms: f64) {
        match command {
            ProcessCommand::Stop => self.close_app(app, now_ms),
            ProcessCommand::Restart => {
                self.registry
                    .update_status(&app.process_id(), ProcessStatus::Restarting);
                self.close_app(app, now_ms);
                self.pending_revives.push(PendingRevive {
                    target: ReviveTarget::App(app),
                    due_ms: now_ms + RESTART_DELAY_MS,
                });
            }
            ProcessCommand::Focus => {
                let window = self.windows.get(app);
                if !window.is_open {
                    return;
                }
                if window.is_minimized {
                    let window = self.windows.get_mut(app);
                    window.is_minimized = false;
                    window.touch();
                    self.registry.set_minimized(&app.process_id(), false);
                }
                self.move_window_to_desktop(app, self.current_desktop);
                self.focus_window(app, now_ms);
            }
            ProcessCommand::Minimize => {
                // Direct toggle, bypassing the taskbar click dispatch
                let window = self.windows.get(app);
                if !window.is_open {
                    return;
                }
                if window.is_minimized {
                    let window = self.windows.get_mut(app);
                    window.is_minimized = false;
                    window.touch();
                    self.registry.set_minimized(&app.process_id(), false);
                } else {
                    self.minimize_app(app, now_ms);
                }
            }
        }
    }

    fn apply_chrome_command(&mut self, chrome: ChromeId, command: ProcessCommand, now_ms: f64) {
        match command {
            ProcessCommand::Stop => self.set_chrome_enabled(chrome, false, now_ms),
            ProcessCommand::Restart => {
                self.set_chrome_enabled(chrome, false, now_ms);
                self.pending_revives.push(PendingRevive {
                    target: ReviveTarget::Chrome(chrome),
                    due_ms: now_ms + RESTART_DELAY_MS,
                });
            }
            // Chrome has no window to surface or hide
            ProcessCommand::Focus | ProcessCommand::Minimize => {}
        }
    }

    /// Apply a due revive.
    ///
    /// Revives are idempotent: if the app was reopened (or a second
    /// restart already revived it) before this timer fired, the window
    /// is only surfaced, never re-launched. A fresh launch resets the
    /// payload to the application's default.
    fn revive(&mut self, target: ReviveTarget, now_ms: f64) {
        match target {
            ReviveTarget::App(app) => {
                if self.windows.get(app).is_open {
                    self.focus_window(app, now_ms);
                } else {
                    let default = self.content.default_payload(app);
                    self.open_app(app, Some(default), now_ms);
                }
            }
            ReviveTarget::Chrome(chrome) => self.set_chrome_enabled(chrome, true, now_ms),
        }
    }

    /// Enable or disable a chrome element's rendering
    pub(crate) fn set_chrome_enabled(&mut self, chrome: ChromeId, enabled: bool, now_ms: f64) {
        let changed = if enabled {
            self.chrome_disabled.remove(&chrome)
        } else {
            self.chrome_disabled.insert(chrome)
        };
        if changed {
            debug!(target: "nimbus::desktop", chrome = chrome.slug(), enabled, "chrome toggled");
            self.reconcile_chrome(now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::shell;
    use super::*;
    use crate::apps::AppPayload;
    use crate::window::Phase;

    #[test]
    fn test_stop_command_closes_app() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);

        s.registry
            .send_command(&AppId::Gallery.process_id(), ProcessCommand::Stop);
        s.tick(10.0);

        assert!(!s.windows.get(AppId::Gallery).is_open);
    }

    #[test]
    fn test_restart_closes_then_revives_after_delay() {
        let mut s = shell(0.0);
        let doc = AppPayload::Document {
            path: "/p".to_string(),
            file_name: "draft.txt".to_string(),
        };
        s.open_app(AppId::TextEditor, Some(doc), 0.0);

        s.registry
            .send_command(&AppId::TextEditor.process_id(), ProcessCommand::Restart);
        s.tick(10.0);
        assert!(!s.windows.get(AppId::TextEditor).is_open);

        // Not yet due
        s.tick(10.0 + RESTART_DELAY_MS - 1.0);
        assert!(!s.windows.get(AppId::TextEditor).is_open);

        // Due: reopened with the default payload, not the old document
        s.tick(10.0 + RESTART_DELAY_MS + 1.0);
        let w = s.windows.get(AppId::TextEditor);
        assert!(w.is_open);
        assert_eq!(w.payload, AppPayload::None);
        assert_eq!(s.windows.active(), Some(AppId::TextEditor));
    }

    #[test]
    fn test_double_restart_revive_is_idempotent() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);
        let pid = AppId::Gallery.process_id();

        s.registry.send_command(&pid, ProcessCommand::Restart);
        s.tick(10.0);
        s.registry.send_command(&pid, ProcessCommand::Restart);
        s.tick(20.0);

        // Both timers fire; the window opens once and stays open
        s.tick(20.0 + RESTART_DELAY_MS + 1.0);
        assert!(s.windows.get(AppId::Gallery).is_open);
        assert!(s.pending_revives.is_empty());

        // A second tick well past both deadlines changes nothing
        let revision = s.windows.get(AppId::Gallery).revision();
        s.tick(20.0 + 2.0 * RESTART_DELAY_MS);
        assert!(s.windows.get(AppId::Gallery).is_open);
        assert_eq!(s.windows.get(AppId::Gallery).revision(), revision);
    }

    #[test]
    fn test_focus_command_surfaces_minimized_window_on_other_desktop() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);
        s.minimize_app(AppId::Gallery, 10.0);
        s.switch_desktop(1);

        s.registry
            .send_command(&AppId::Gallery.process_id(), ProcessCommand::Focus);
        s.tick(20.0);

        let w = s.windows.get(AppId::Gallery);
        assert!(!w.is_minimized);
        assert_eq!(w.desktop, 1);
        assert_eq!(s.windows.active(), Some(AppId::Gallery));
    }

    #[test]
    fn test_minimize_command_toggles_directly() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);
        let pid = AppId::Gallery.process_id();

        s.registry.send_command(&pid, ProcessCommand::Minimize);
        s.tick(10.0);
        assert!(s.windows.get(AppId::Gallery).is_minimized);

        s.registry.send_command(&pid, ProcessCommand::Minimize);
        s.tick(20.0);
        assert!(!s.windows.get(AppId::Gallery).is_minimized);
    }

    #[test]
    fn test_stop_command_disables_chrome_and_restart_revives_it() {
        let mut s = shell(0.0);
        let pid = ChromeId::Taskbar.process_id();
        assert!(s.chrome_enabled(ChromeId::Taskbar));
        assert!(s.registry.process(&pid).is_some());

        s.registry.send_command(&pid, ProcessCommand::Stop);
        s.tick(10.0);
        assert!(!s.chrome_enabled(ChromeId::Taskbar));
        assert!(s.registry.process(&pid).is_none());

        s.registry.send_command(&pid, ProcessCommand::Restart);
        s.tick(20.0);
        s.tick(20.0 + RESTART_DELAY_MS + 1.0);
        assert!(s.chrome_enabled(ChromeId::Taskbar));
        assert!(s.registry.process(&pid).is_some());
    }

    #[test]
    fn test_command_for_unknown_id_is_ignored() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);
        let revision = s.windows.get(AppId::Gallery).revision();

        s.registry
            .send_command(&ProcessId::app("no_such_app"), ProcessCommand::Stop);
        s.registry
            .send_command(&ProcessId::kernel(), ProcessCommand::Stop);
        s.tick(10.0);

        assert!(s.windows.get(AppId::Gallery).is_open);
        assert_eq!(s.windows.get(AppId::Gallery).revision(), revision);
    }

    #[test]
    fn test_revive_while_exit_animation_running() {
        let mut s = shell(0.0);
        s.open_app(AppId::Gallery, None, 0.0);
        let pid = AppId::Gallery.process_id();

        s.registry.send_command(&pid, ProcessCommand::Restart);
        s.tick(10.0);
        assert!(matches!(
            s.windows.get(AppId::Gallery).phase,
            Phase::Exiting { .. }
        ));

        // Exit completes, then the revive fires
        s.tick(2_500.0);
        let w = s.windows.get(AppId::Gallery);
        assert!(w.is_open);
        assert!(matches!(w.phase, Phase::Entering { .. }));
    }
}
