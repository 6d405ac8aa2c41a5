//! Tick-driven lifecycle: exits, frame signals, chrome registration,
//! and metrics sampling
//!
//! The shell never reads a clock. The host calls [`DesktopShell::tick`]
//! with the current timestamp (typically once per animation frame) and
//! [`DesktopShell::frame_presented`] after each paint; every deferred
//! effect hangs off those two signals.

use std::collections::HashMap;

use nimbus_process::{ProcessId, ProcessKind, ProcessSpec, WorkloadProbe};

use crate::apps::{AppId, ChromeId};
use crate::transition::WINDOW_ANIMATION_MS;
use crate::window::{Phase, WindowMap};
use super::DesktopShell;

/// Static content-complexity estimates for chrome elements
fn chrome_node_count(chrome: ChromeId) -> u32 {
    match chrome {
        ChromeId::Taskbar => 80,
        ChromeId::StartMenu => 140,
        ChromeId::Desktop => 40,
        ChromeId::TaskView => 190,
    }
}

/// Workload proxies assembled from shell state for one sampling pass.
///
/// "Renders" are state-mutation counts: the delta of a window's revision
/// since the last sample. Chrome reports a steady heartbeat of one.
struct ShellWorkload<'a> {
    windows: &'a WindowMap,
    sampled_revisions: &'a mut HashMap<ProcessId, u64>,
    node_counts: HashMap<ProcessId, u32>,
}

impl WorkloadProbe for ShellWorkload<'_> {
    fn take_renders(&mut self, id: &ProcessId) -> u32 {
        if let Some(app) = id.app_slug().and_then(AppId::from_slug) {
            let revision = self.windows.get(app).revision();
            let previous = self
                .sampled_revisions
                .insert(id.clone(), revision)
                .unwrap_or(0);
            revision.saturating_sub(previous) as u32
        } else if id.ui_slug().is_some() {
            1
        } else {
            0
        }
    }

    fn node_count(&self, id: &ProcessId) -> u32 {
        self.node_counts.get(id).copied().unwrap_or(0)
    }
}

impl DesktopShell {
    /// Advance all deferred work to `now_ms`.
    ///
    /// Order matters: exit animations that ran out are finalized (and
    /// their processes unregistered) before newly drained commands can
    /// reopen the same windows.
    pub fn tick(&mut self, now_ms: f64) {
        self.finalize_exits(now_ms);
        self.process_commands(now_ms);
        self.task_view.tick(now_ms);
        self.reconcile_chrome(now_ms);
        self.sample_metrics(now_ms);
    }

    /// Signal that the renderer presented a frame.
    ///
    /// Entering windows advance toward visibility; each needs
    /// [`ENTER_FRAME_COUNT`](crate::transition::ENTER_FRAME_COUNT)
    /// presentations so the browser-style renderer is guaranteed to have
    /// painted the pre-transition state before the transition runs.
    pub fn frame_presented(&mut self) {
        for id in AppId::ALL {
            if matches!(self.windows.get(id).phase, Phase::Entering { .. }) {
                self.windows.get_mut(id).frame_presented();
            }
        }
    }

    /// Unmount windows whose exit animation has finished and tear down
    /// their process entries
    fn finalize_exits(&mut self, now_ms: f64) {
        for id in AppId::ALL {
            let expired = matches!(
                self.windows.get(id).phase,
                Phase::Exiting { since_ms } if now_ms - since_ms >= WINDOW_ANIMATION_MS
            );
            if !expired {
                continue;
            }

            let window = self.windows.get_mut(id);
            window.phase = Phase::Hidden;
            window.touch();

            if !self.windows.get(id).is_open {
                let pid = id.process_id();
                self.registry.unregister(&pid);
                self.samplers.deactivate(&pid, now_ms);
                self.sampled_revisions.remove(&pid);
            }
        }
    }

    /// Align chrome process registrations with what is enabled and
    /// visible right now
    pub(crate) fn reconcile_chrome(&mut self, now_ms: f64) {
        for chrome in ChromeId::ALL {
            let visible = match chrome {
                ChromeId::Taskbar | ChromeId::Desktop => true,
                ChromeId::StartMenu => self.start_menu_open,
                ChromeId::TaskView => self.task_view.is_rendered(),
            };
            let desired = visible && self.chrome_enabled(chrome);
            let registered = self.chrome_registered.contains(&chrome);
            let pid = chrome.process_id();

            if desired && !registered {
                self.registry
                    .register(ProcessSpec::new(pid.clone(), chrome.label(), ProcessKind::Ui));
                self.samplers.activate(pid, ProcessKind::Ui, now_ms);
                self.chrome_registered.insert(chrome);
            } else if !desired && registered {
                self.registry.unregister(&pid);
                self.samplers.deactivate(&pid, now_ms);
                self.chrome_registered.remove(&chrome);
            }
        }
    }

    /// Run due samplers against the current workload proxies
    fn sample_metrics(&mut self, now_ms: f64) {
        let mut node_counts = HashMap::new();
        for id in AppId::ALL {
            let window = self.windows.get(id);
            if window.is_open || window.is_rendered() {
                node_counts.insert(id.process_id(), self.content.node_count(id));
            }
        }
        for chrome in self.chrome_registered.iter() {
            node_counts.insert(chrome.process_id(), chrome_node_count(*chrome));
        }

        let mut workload = ShellWorkload {
            windows: &self.windows,
            sampled_revisions: &mut self.sampled_revisions,
            node_counts,
        };
        self.samplers.tick(now_ms, &mut workload, &self.registry);
    }
}
