//! Process table with change notifications and a separate command channel

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::types::{
    ProcessCommand, ProcessId, ProcessInfo, ProcessKind, ProcessMetrics, ProcessStatus,
};

/// What a component supplies when registering itself
#[derive(Clone, Debug)]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub name: String,
    pub kind: ProcessKind,
}

impl ProcessSpec {
    pub fn new(id: ProcessId, name: &str, kind: ProcessKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
        }
    }
}

/// Handle for removing a previously installed listener
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type TableListener = Box<dyn Fn(&[ProcessInfo]) + Send + Sync>;
type CommandListener = Box<dyn Fn(&ProcessId, ProcessCommand) + Send + Sync>;

struct ListenerSet<L> {
    next_id: u64,
    entries: Vec<(ListenerId, L)>,
}

impl<L> ListenerSet<L> {
    fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) {
        self.entries.retain(|(lid, _)| *lid != id);
    }
}

/// Single source of truth for which processes are currently alive.
///
/// The table tracks state; the command channel requests actions. The two
/// are deliberately decoupled: the registry stores and broadcasts, it
/// never applies a command itself. Whoever owns the real resource (the
/// desktop shell for windows and chrome) installs a command listener and
/// decides how to honor each request.
///
/// One registry exists per running session, constructed by the
/// composition root and shared as `Arc<ProcessRegistry>`.
///
/// Listeners must not install or remove other listeners from inside a
/// notification.
pub struct ProcessRegistry {
    table: RwLock<HashMap<ProcessId, ProcessInfo>>,
    listeners: Mutex<ListenerSet<TableListener>>,
    command_listeners: Mutex<ListenerSet<CommandListener>>,
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
            listeners: Mutex::new(ListenerSet::new()),
            command_listeners: Mutex::new(ListenerSet::new()),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Insert or replace the entry for `spec.id`.
    ///
    /// A re-registration always yields a fresh entry: status `Running`,
    /// zeroed metrics. Notifies table subscribers synchronously.
    pub fn register(&self, spec: ProcessSpec) {
        {
            let mut table = self.table.write();
            table.insert(
                spec.id.clone(),
                ProcessInfo {
                    id: spec.id,
                    name: spec.name,
                    kind: spec.kind,
                    status: ProcessStatus::Running,
                    metrics: ProcessMetrics::default(),
                    minimized: false,
                },
            );
        }
        self.notify_listeners();
    }

    /// Remove the entry if present; no-op (and no notification) when absent.
    pub fn unregister(&self, id: &ProcessId) {
        let removed = self.table.write().remove(id).is_some();
        if removed {
            self.notify_listeners();
        }
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Overwrite the metrics of an existing entry.
    ///
    /// This is the high-frequency path: it never notifies table
    /// subscribers, so a 1 Hz sampler does not force consumers that only
    /// care about table structure to re-read.
    pub fn update_metrics(&self, id: &ProcessId, metrics: ProcessMetrics) {
        if let Some(info) = self.table.write().get_mut(id) {
            info.metrics = metrics;
        }
    }

    /// Record a status transition; notifies table subscribers.
    pub fn update_status(&self, id: &ProcessId, status: ProcessStatus) {
        let changed = match self.table.write().get_mut(id) {
            Some(info) => {
                info.status = status;
                true
            }
            None => false,
        };
        if changed {
            self.notify_listeners();
        }
    }

    /// Record whether the owning window is minimized; notifies subscribers.
    pub fn set_minimized(&self, id: &ProcessId, minimized: bool) {
        let changed = match self.table.write().get_mut(id) {
            Some(info) if info.minimized != minimized => {
                info.minimized = minimized;
                true
            }
            _ => false,
        };
        if changed {
            self.notify_listeners();
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of all entries, ordered by id for deterministic iteration
    pub fn processes(&self) -> Vec<ProcessInfo> {
        let mut list: Vec<ProcessInfo> = self.table.read().values().cloned().collect();
        list.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        list
    }

    /// Snapshot of a single entry
    pub fn process(&self, id: &ProcessId) -> Option<ProcessInfo> {
        self.table.read().get(id).cloned()
    }

    /// Number of registered processes
    pub fn count(&self) -> usize {
        self.table.read().len()
    }

    // =========================================================================
    // Table subscriptions
    // =========================================================================

    /// Install a table-change listener.
    ///
    /// The listener is invoked immediately with the current snapshot, so
    /// a late subscriber misses nothing.
    pub fn subscribe(&self, listener: impl Fn(&[ProcessInfo]) + Send + Sync + 'static) -> ListenerId {
        let snapshot = self.processes();
        listener(&snapshot);
        self.listeners.lock().insert(Box::new(listener))
    }

    /// Remove a table-change listener
    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.lock().remove(id);
    }

    fn notify_listeners(&self) {
        let snapshot = self.processes();
        for (_, listener) in &self.listeners.lock().entries {
            listener(&snapshot);
        }
    }

    // =========================================================================
    // Command channel
    // =========================================================================

    /// Install a command listener on the separate command channel
    pub fn on_command(
        &self,
        listener: impl Fn(&ProcessId, ProcessCommand) + Send + Sync + 'static,
    ) -> ListenerId {
        self.command_listeners.lock().insert(Box::new(listener))
    }

    /// Remove a command listener
    pub fn remove_command_listener(&self, id: ListenerId) {
        self.command_listeners.lock().remove(id);
    }

    /// Broadcast `(id, command)` to every command listener.
    ///
    /// The target id is not validated against the table: the registry has
    /// no way to know which component owns which resource. A command for
    /// an unknown id is delivered and ignored by everyone.
    pub fn send_command(&self, id: &ProcessId, command: ProcessCommand) {
        debug!(target: "nimbus::process", %id, ?command, "broadcasting command");
        for (_, listener) in &self.command_listeners.lock().entries {
            listener(id, command);
        }
    }

    /// Install a command listener that queues commands for later draining.
    ///
    /// Single-threaded consumers (the desktop shell) drain the inbox once
    /// per tick instead of reacting inside the broadcast.
    pub fn command_inbox(&self) -> CommandInbox {
        let queue: Arc<Mutex<VecDeque<(ProcessId, ProcessCommand)>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let sink = Arc::clone(&queue);
        self.on_command(move |id, command| {
            sink.lock().push_back((id.clone(), command));
        });
        CommandInbox { queue }
    }
}

/// Drainable queue of broadcast commands, in arrival order
pub struct CommandInbox {
    queue: Arc<Mutex<VecDeque<(ProcessId, ProcessCommand)>>>,
}

impl CommandInbox {
    /// Take all queued commands, oldest first
    pub fn drain(&self) -> Vec<(ProcessId, ProcessCommand)> {
        self.queue.lock().drain(..).collect()
    }

    /// Whether any commands are waiting
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spec(id: ProcessId, name: &str, kind: ProcessKind) -> ProcessSpec {
        ProcessSpec::new(id, name, kind)
    }

    #[test]
    fn test_register_and_query() {
        let registry = ProcessRegistry::new();
        registry.register(spec(ProcessId::app("editor"), "Editor", ProcessKind::App));

        let info = registry.process(&ProcessId::app("editor")).unwrap();
        assert_eq!(info.name, "Editor");
        assert_eq!(info.status, ProcessStatus::Running);
        assert_eq!(info.metrics.uptime_secs, 0);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_reregister_resets_entry() {
        let registry = ProcessRegistry::new();
        let id = ProcessId::app("editor");
        registry.register(spec(id.clone(), "Editor", ProcessKind::App));
        registry.update_metrics(
            &id,
            ProcessMetrics {
                cpu_percent: 12.0,
                memory_mb: 80.0,
                uptime_secs: 42,
                node_count: 10,
            },
        );
        registry.update_status(&id, ProcessStatus::Suspended);

        registry.register(spec(id.clone(), "Editor", ProcessKind::App));
        let info = registry.process(&id).unwrap();
        assert_eq!(info.status, ProcessStatus::Running);
        assert_eq!(info.metrics.uptime_secs, 0);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let registry = ProcessRegistry::new();
        let notifications = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&notifications);
        registry.subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        // Replay-on-subscribe counts once
        assert_eq!(notifications.load(Ordering::SeqCst), 1);

        registry.unregister(&ProcessId::app("ghost"));
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscribe_replays_current_snapshot() {
        let registry = ProcessRegistry::new();
        registry.register(spec(ProcessId::app("a"), "A", ProcessKind::App));
        registry.register(spec(ProcessId::app("b"), "B", ProcessKind::App));
        registry.register(spec(ProcessId::kernel(), "Kernel", ProcessKind::Kernel));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        registry.subscribe(move |snapshot| {
            sink.lock().push(snapshot.len());
        });

        assert_eq!(seen.lock().as_slice(), &[3]);
    }

    #[test]
    fn test_metrics_update_does_not_notify() {
        let registry = ProcessRegistry::new();
        let id = ProcessId::app("a");
        registry.register(spec(id.clone(), "A", ProcessKind::App));

        let notifications = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&notifications);
        registry.subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        let after_subscribe = notifications.load(Ordering::SeqCst);

        registry.update_metrics(
            &id,
            ProcessMetrics {
                cpu_percent: 5.0,
                memory_mb: 20.0,
                uptime_secs: 1,
                node_count: 3,
            },
        );
        assert_eq!(notifications.load(Ordering::SeqCst), after_subscribe);

        // But the stored metrics did change
        let info = registry.process(&id).unwrap();
        assert!((info.metrics.cpu_percent - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_status_update_notifies() {
        let registry = ProcessRegistry::new();
        let id = ProcessId::app("a");
        registry.register(spec(id.clone(), "A", ProcessKind::App));

        let notifications = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&notifications);
        registry.subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        let before = notifications.load(Ordering::SeqCst);

        registry.update_status(&id, ProcessStatus::Restarting);
        assert_eq!(notifications.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let registry = ProcessRegistry::new();
        let notifications = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&notifications);
        let listener = registry.subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        registry.unsubscribe(listener);

        registry.register(spec(ProcessId::app("a"), "A", ProcessKind::App));
        assert_eq!(notifications.load(Ordering::SeqCst), 1); // replay only
    }

    #[test]
    fn test_send_command_without_listeners() {
        let registry = ProcessRegistry::new();
        registry.register(spec(ProcessId::app("a"), "A", ProcessKind::App));

        // No listeners installed: must not panic, must not touch the table
        registry.send_command(&ProcessId::app("a"), ProcessCommand::Stop);
        assert_eq!(registry.count(), 1);
        assert_eq!(
            registry.process(&ProcessId::app("a")).unwrap().status,
            ProcessStatus::Running
        );
    }

    #[test]
    fn test_command_channel_broadcasts_unknown_ids() {
        let registry = ProcessRegistry::new();
        let inbox = registry.command_inbox();

        registry.send_command(&ProcessId::app("nobody"), ProcessCommand::Restart);

        let drained = inbox.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].0, ProcessId::app("nobody"));
        assert_eq!(drained[0].1, ProcessCommand::Restart);
    }

    #[test]
    fn test_command_inbox_drains_fifo() {
        let registry = ProcessRegistry::new();
        let inbox = registry.command_inbox();

        registry.send_command(&ProcessId::app("a"), ProcessCommand::Stop);
        registry.send_command(&ProcessId::app("b"), ProcessCommand::Focus);
        registry.send_command(&ProcessId::app("c"), ProcessCommand::Minimize);

        let drained = inbox.drain();
        let order: Vec<&str> = drained.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, ["app:a", "app:b", "app:c"]);
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_set_minimized() {
        let registry = ProcessRegistry::new();
        let id = ProcessId::app("a");
        registry.register(spec(id.clone(), "A", ProcessKind::App));

        registry.set_minimized(&id, true);
        assert!(registry.process(&id).unwrap().minimized);

        registry.set_minimized(&id, false);
        assert!(!registry.process(&id).unwrap().minimized);
    }

    #[test]
    fn test_snapshot_ordered_by_id() {
        let registry = ProcessRegistry::new();
        registry.register(spec(ProcessId::ui("taskbar"), "Taskbar", ProcessKind::Ui));
        registry.register(spec(ProcessId::app("b"), "B", ProcessKind::App));
        registry.register(spec(ProcessId::app("a"), "A", ProcessKind::App));

        let snapshot = registry.processes();
        let ids: Vec<&str> = snapshot.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["app:a", "app:b", "ui:taskbar"]);
    }
}
