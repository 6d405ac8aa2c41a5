//! Process identity, classification, and metrics types

use serde::{Deserialize, Serialize};
use std::fmt;

/// String key identifying a registered process.
///
/// Ids are convention-tagged: applications register as `app:<slug>`,
/// desktop chrome as `ui:<slug>`, and the kernel as the bare `kernel` id.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessId(String);

impl ProcessId {
    /// Id of an application process
    pub fn app(slug: &str) -> Self {
        Self(format!("app:{}", slug))
    }

    /// Id of a desktop chrome process
    pub fn ui(slug: &str) -> Self {
        Self(format!("ui:{}", slug))
    }

    /// Id of the kernel process
    pub fn kernel() -> Self {
        Self("kernel".to_string())
    }

    /// The raw string form
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The application slug, if this is an `app:` id
    pub fn app_slug(&self) -> Option<&str> {
        self.0.strip_prefix("app:")
    }

    /// The chrome slug, if this is a `ui:` id
    pub fn ui_slug(&self) -> Option<&str> {
        self.0.strip_prefix("ui:")
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessId({})", self.0)
    }
}

/// Process classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessKind {
    /// User-launched application
    App,
    /// Background service
    Service,
    /// Desktop chrome element (taskbar, menus, overlays)
    Ui,
    /// The kernel itself
    Kernel,
}

/// Externally driven process status
///
/// The registry records transitions but does not enforce them; the
/// component owning the process decides what the status means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    #[default]
    Running,
    Suspended,
    Restarting,
    Stopped,
}

/// Simulated utilization numbers for one process.
///
/// Values are overwritten on every sample, never accumulated. They are
/// synthesized from observable proxies and carry no accuracy guarantee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// CPU load in percent, bounded to [0, 100]
    pub cpu_percent: f32,
    /// Resident memory in megabytes
    pub memory_mb: f32,
    /// Whole seconds since the process started
    pub uptime_secs: u64,
    /// Live content-node count reported by the owning component
    pub node_count: u32,
}

/// A registered process and its current state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub id: ProcessId,
    /// Human-readable name shown by the task manager
    pub name: String,
    pub kind: ProcessKind,
    pub status: ProcessStatus,
    pub metrics: ProcessMetrics,
    /// Whether the owning window is currently minimized
    pub minimized: bool,
}

/// Lifecycle request broadcast on the command channel.
///
/// The registry never interprets commands; whichever component owns the
/// target resource decides how to honor them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessCommand {
    Stop,
    Restart,
    Focus,
    Minimize,
}
