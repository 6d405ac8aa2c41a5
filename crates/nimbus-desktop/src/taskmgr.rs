//! Task manager model: registry snapshots, grouping, and commands
//!
//! The task manager owns no windows. It polls the registry for
//! snapshots (metric updates deliberately bypass table notifications,
//! so polling is the only way to see them) and requests every lifecycle
//! action through the command channel; the desktop shell decides how to
//! honor each request.

use std::collections::VecDeque;

use nimbus_process::{
    ProcessCommand, ProcessId, ProcessInfo, ProcessKind, ProcessRegistry, SAMPLE_INTERVAL_MS,
};

/// Samples kept for the CPU and memory header graphs
pub const HISTORY_LEN: usize = 40;

/// Memory budget the usage graph is normalized against
const MEMORY_BUDGET_MB: f32 = 2048.0;

/// Processes grouped the way the list presents them
pub struct ProcessGroups<'a> {
    /// User applications
    pub apps: Vec<&'a ProcessInfo>,
    /// Services and the kernel
    pub background: Vec<&'a ProcessInfo>,
    /// Desktop chrome
    pub ui: Vec<&'a ProcessInfo>,
}

/// Task manager view model
pub struct TaskManager {
    snapshot: Vec<ProcessInfo>,
    selected: Option<ProcessId>,
    cpu_history: VecDeque<f32>,
    memory_history: VecDeque<f32>,
    next_poll_ms: f64,
    end_all_armed: bool,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            selected: None,
            cpu_history: VecDeque::from(vec![0.0; HISTORY_LEN]),
            memory_history: VecDeque::from(vec![0.0; HISTORY_LEN]),
            next_poll_ms: f64::NEG_INFINITY,
            end_all_armed: false,
        }
    }

    /// Refresh the snapshot if the poll interval has elapsed.
    /// Returns whether a refresh happened.
    pub fn poll(&mut self, now_ms: f64, registry: &ProcessRegistry) -> bool {
        if now_ms < self.next_poll_ms {
            return false;
        }
        self.next_poll_ms = now_ms + SAMPLE_INTERVAL_MS;
        self.refresh(registry);
        true
    }

    /// Refresh the snapshot immediately (the toolbar's refresh button)
    pub fn refresh(&mut self, registry: &ProcessRegistry) {
        self.snapshot = registry.processes();
        if let Some(selected) = &self.selected {
            if !self.snapshot.iter().any(|p| &p.id == selected) {
                self.selected = None;
            }
        }

        let total_cpu: f32 = self.snapshot.iter().map(|p| p.metrics.cpu_percent).sum();
        let total_memory: f32 = self.snapshot.iter().map(|p| p.metrics.memory_mb).sum();

        push_sample(&mut self.cpu_history, total_cpu.min(100.0));
        push_sample(
            &mut self.memory_history,
            (total_memory / MEMORY_BUDGET_MB * 100.0).min(100.0),
        );
    }

    /// The last polled snapshot
    pub fn processes(&self) -> &[ProcessInfo] {
        &self.snapshot
    }

    /// Snapshot grouped into Apps / Background / Ui
    pub fn groups(&self) -> ProcessGroups<'_> {
        let mut groups = ProcessGroups {
            apps: Vec::new(),
            background: Vec::new(),
            ui: Vec::new(),
        };
        for process in &self.snapshot {
            match process.kind {
                ProcessKind::App => groups.apps.push(process),
                ProcessKind::Service | ProcessKind::Kernel => groups.background.push(process),
                ProcessKind::Ui => groups.ui.push(process),
            }
        }
        groups
    }

    /// Total CPU per poll, oldest first
    pub fn cpu_history(&self) -> impl Iterator<Item = f32> + '_ {
        self.cpu_history.iter().copied()
    }

    /// Total memory per poll as a percentage of the budget, oldest first
    pub fn memory_history(&self) -> impl Iterator<Item = f32> + '_ {
        self.memory_history.iter().copied()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, id: Option<ProcessId>) {
        self.selected = id;
    }

    pub fn selected(&self) -> Option<&ProcessInfo> {
        let selected = self.selected.as_ref()?;
        self.snapshot.iter().find(|p| &p.id == selected)
    }

    /// Whether End Task applies to the selection. The kernel is
    /// protected.
    pub fn can_end_selected(&self) -> bool {
        self.selected()
            .map(|p| p.kind != ProcessKind::Kernel)
            .unwrap_or(false)
    }

    // =========================================================================
    // Actions (everything goes through the command channel)
    // =========================================================================

    /// End Task on the selection. Refused for the kernel.
    pub fn end_selected(&self, registry: &ProcessRegistry) -> bool {
        if !self.can_end_selected() {
            return false;
        }
        if let Some(process) = self.selected() {
            registry.send_command(&process.id, ProcessCommand::Stop);
            return true;
        }
        false
    }

    /// Restart the selection
    pub fn restart_selected(&self, registry: &ProcessRegistry) -> bool {
        match self.selected() {
            Some(process) => {
                registry.send_command(&process.id, ProcessCommand::Restart);
                true
            }
            None => false,
        }
    }

    /// Bring a process's window to the front
    pub fn bring_to_front(&self, id: &ProcessId, registry: &ProcessRegistry) {
        registry.send_command(id, ProcessCommand::Focus);
    }

    /// Toggle a process's window between minimized and restored
    pub fn toggle_minimize(&self, id: &ProcessId, registry: &ProcessRegistry) {
        registry.send_command(id, ProcessCommand::Minimize);
    }

    /// Arm End All Apps. Destructive and irreversible from this view, so
    /// it takes an explicit confirmation step.
    pub fn request_end_all(&mut self) {
        self.end_all_armed = true;
    }

    /// Whether End All Apps awaits confirmation
    pub fn end_all_armed(&self) -> bool {
        self.end_all_armed
    }

    pub fn cancel_end_all(&mut self) {
        self.end_all_armed = false;
    }

    /// Confirm End All Apps: stop every app-type process in the
    /// snapshot. Returns how many stop commands went out; zero when not
    /// armed.
    pub fn confirm_end_all(&mut self, registry: &ProcessRegistry) -> usize {
        if !self.end_all_armed {
            return 0;
        }
        self.end_all_armed = false;

        let mut sent = 0;
        for process in self.snapshot.iter().filter(|p| p.kind == ProcessKind::App) {
            registry.send_command(&process.id, ProcessCommand::Stop);
            sent += 1;
        }
        sent
    }
}

fn push_sample(history: &mut VecDeque<f32>, value: f32) {
    if history.len() >= HISTORY_LEN {
        history.pop_front();
    }
    history.push_back(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_process::ProcessSpec;

    fn seeded_registry() -> ProcessRegistry {
        let registry = ProcessRegistry::new();
        registry.register(ProcessSpec::new(
            ProcessId::kernel(),
            "Kernel",
            ProcessKind::Kernel,
        ));
        registry.register(ProcessSpec::new(
            ProcessId::app("gallery"),
            "Gallery",
            ProcessKind::App,
        ));
        registry.register(ProcessSpec::new(
            ProcessId::app("text_editor"),
            "Text Editor",
            ProcessKind::App,
        ));
        registry.register(ProcessSpec::new(
            ProcessId::ui("taskbar"),
            "Taskbar Host",
            ProcessKind::Ui,
        ));
        registry
    }

    #[test]
    fn test_poll_respects_interval() {
        let registry = seeded_registry();
        let mut tm = TaskManager::new();

        assert!(tm.poll(0.0, &registry));
        assert!(!tm.poll(500.0, &registry));
        assert!(tm.poll(SAMPLE_INTERVAL_MS, &registry));
        assert_eq!(tm.processes().len(), 4);
    }

    #[test]
    fn test_groups_split_by_kind() {
        let registry = seeded_registry();
        let mut tm = TaskManager::new();
        tm.poll(0.0, &registry);

        let groups = tm.groups();
        assert_eq!(groups.apps.len(), 2);
        assert_eq!(groups.background.len(), 1);
        assert_eq!(groups.ui.len(), 1);
    }

    #[test]
    fn test_kernel_is_protected_from_end_task() {
        let registry = seeded_registry();
        let inbox = registry.command_inbox();
        let mut tm = TaskManager::new();
        tm.poll(0.0, &registry);

        tm.select(Some(ProcessId::kernel()));
        assert!(!tm.can_end_selected());
        assert!(!tm.end_selected(&registry));
        assert!(inbox.is_empty());

        tm.select(Some(ProcessId::app("gallery")));
        assert!(tm.can_end_selected());
        assert!(tm.end_selected(&registry));
        let drained = inbox.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].0, ProcessId::app("gallery"));
    }

    #[test]
    fn test_end_all_requires_confirmation() {
        let registry = seeded_registry();
        let inbox = registry.command_inbox();
        let mut tm = TaskManager::new();
        tm.poll(0.0, &registry);

        // Not armed: nothing happens
        assert_eq!(tm.confirm_end_all(&registry), 0);
        assert!(inbox.is_empty());

        tm.request_end_all();
        assert!(tm.end_all_armed());
        assert_eq!(tm.confirm_end_all(&registry), 2);
        assert!(!tm.end_all_armed());

        let drained = inbox.drain();
        assert_eq!(drained.len(), 2);
        assert!(drained.iter().all(|(_, cmd)| *cmd == ProcessCommand::Stop));
        assert!(drained.iter().all(|(id, _)| id.app_slug().is_some()));
    }

    #[test]
    fn test_cancel_end_all() {
        let registry = seeded_registry();
        let mut tm = TaskManager::new();
        tm.poll(0.0, &registry);

        tm.request_end_all();
        tm.cancel_end_all();
        assert_eq!(tm.confirm_end_all(&registry), 0);
    }

    #[test]
    fn test_selection_cleared_when_process_exits() {
        let registry = seeded_registry();
        let mut tm = TaskManager::new();
        tm.poll(0.0, &registry);
        tm.select(Some(ProcessId::app("gallery")));
        assert!(tm.selected().is_some());

        registry.unregister(&ProcessId::app("gallery"));
        tm.refresh(&registry);
        assert!(tm.selected().is_none());
    }

    #[test]
    fn test_history_is_bounded_and_rolls() {
        let registry = seeded_registry();
        let mut tm = TaskManager::new();

        for i in 0..(HISTORY_LEN + 10) {
            tm.poll(i as f64 * SAMPLE_INTERVAL_MS, &registry);
        }
        assert_eq!(tm.cpu_history().count(), HISTORY_LEN);
        assert_eq!(tm.memory_history().count(), HISTORY_LEN);
        assert!(tm.cpu_history().all(|v| (0.0..=100.0).contains(&v)));
    }

    #[test]
    fn test_restart_and_window_actions_send_commands() {
        let registry = seeded_registry();
        let inbox = registry.command_inbox();
        let mut tm = TaskManager::new();
        tm.poll(0.0, &registry);

        tm.select(Some(ProcessId::app("text_editor")));
        assert!(tm.restart_selected(&registry));
        tm.bring_to_front(&ProcessId::app("gallery"), &registry);
        tm.toggle_minimize(&ProcessId::app("gallery"), &registry);

        let commands: Vec<ProcessCommand> = inbox.drain().into_iter().map(|(_, c)| c).collect();
        assert_eq!(
            commands,
            [
                ProcessCommand::Restart,
                ProcessCommand::Focus,
                ProcessCommand::Minimize
            ]
        );
    }
}
