//! Process registry and simulated metrics for the Nimbus desktop
//!
//! This crate tracks synthetic "processes" (running applications and
//! desktop chrome) for the task manager. It deliberately separates two
//! concerns:
//!
//! - The **table** records what is currently alive, with change
//!   notifications replayed to late subscribers.
//! - The **command channel** broadcasts lifecycle requests
//!   (stop/restart/focus/minimize) that the registry itself never
//!   applies; the component owning the resource decides how to honor
//!   them.
//!
//! Metrics are produced by [`SamplerPool`], an explicitly simulated
//! generator fed by observable proxies through [`WorkloadProbe`].

mod registry;
mod sampler;
mod types;

pub use registry::{CommandInbox, ListenerId, ProcessRegistry, ProcessSpec};
pub use sampler::{SamplerPool, WorkloadProbe, RELAUNCH_GAP_MS, SAMPLE_INTERVAL_MS};
pub use types::{
    ProcessCommand, ProcessId, ProcessInfo, ProcessKind, ProcessMetrics, ProcessStatus,
};
