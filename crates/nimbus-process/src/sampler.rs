//! Simulated per-process utilization sampling
//!
//! Nothing here reads real OS counters. Metrics are synthesized from
//! observable proxies (state-mutation frequency, content-node counts)
//! plus bounded noise, so the task manager has plausible numbers to
//! show. The only properties consumers may rely on are boundedness and
//! monotonically increasing uptime.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::registry::ProcessRegistry;
use crate::types::{ProcessId, ProcessKind, ProcessMetrics};

/// Sampling cadence, also used by the task manager's snapshot polling
pub const SAMPLE_INTERVAL_MS: f64 = 1_000.0;

/// An app reactivated within this gap keeps its original start time;
/// a longer gap is treated as a fresh launch
pub const RELAUNCH_GAP_MS: f64 = 10_000.0;

const MEMORY_BASELINE_MB: f32 = 15.0;
const MEMORY_PER_NODE_MB: f32 = 0.02;
const MEMORY_PER_RENDER_MB: f32 = 0.1;
const MEMORY_OFFSET_MAX_MB: f32 = 50.0;
const CPU_PER_RENDER: f32 = 2.0;
const CPU_NODE_DIVISOR: f32 = 500.0;

/// Observable proxies the sampler draws from.
///
/// The desktop shell implements this from its own state-mutation counts
/// and the content provider's reported widget counts; tests supply a
/// fixed stub. A port to a different host can substitute any other
/// bounded proxy (queue depth, message rate) without touching the
/// sampler.
pub trait WorkloadProbe {
    /// Renders observed since the last sample for `id`; the counter is
    /// consumed (the sampler reports a rate, not a running total)
    fn take_renders(&mut self, id: &ProcessId) -> u32;

    /// Current live content-node count for `id`
    fn node_count(&self, id: &ProcessId) -> u32;
}

struct ProcessSampler {
    start_ms: f64,
    next_sample_ms: f64,
    memory_offset: f32,
    memory_trend: f32,
}

/// One sampler per activated process, driven by the shell's tick
pub struct SamplerPool {
    samplers: HashMap<ProcessId, ProcessSampler>,
    /// Deactivation instant and original start time of recently stopped
    /// processes, for the relaunch-gap rule
    recent: HashMap<ProcessId, (f64, f64)>,
    rng: SmallRng,
}

impl SamplerPool {
    /// Create a pool with a deterministic noise source
    pub fn new(seed: u64) -> Self {
        Self {
            samplers: HashMap::new(),
            recent: HashMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Start sampling for a process. Idempotent while already active.
    ///
    /// App-type processes reactivated within [`RELAUNCH_GAP_MS`] keep
    /// their original start time, so uptime survives a brief
    /// close/reopen; anything else counts as a fresh launch.
    pub fn activate(&mut self, id: ProcessId, kind: ProcessKind, now_ms: f64) {
        if self.samplers.contains_key(&id) {
            return;
        }

        self.recent
            .retain(|_, (stopped_ms, _)| now_ms - *stopped_ms <= RELAUNCH_GAP_MS);

        let start_ms = match self.recent.remove(&id) {
            Some((stopped_ms, original_start))
                if kind == ProcessKind::App && now_ms - stopped_ms <= RELAUNCH_GAP_MS =>
            {
                original_start
            }
            _ => now_ms,
        };

        self.samplers.insert(
            id,
            ProcessSampler {
                start_ms,
                next_sample_ms: now_ms + SAMPLE_INTERVAL_MS,
                memory_offset: self.rng.gen_range(0.0..20.0),
                memory_trend: 1.0,
            },
        );
    }

    /// Stop sampling for a process and remember when it stopped
    pub fn deactivate(&mut self, id: &ProcessId, now_ms: f64) {
        if let Some(sampler) = self.samplers.remove(id) {
            self.recent.insert(id.clone(), (now_ms, sampler.start_ms));
        }
    }

    /// Whether a sampler is running for `id`
    pub fn is_active(&self, id: &ProcessId) -> bool {
        self.samplers.contains_key(id)
    }

    /// Run every sampler whose interval has elapsed and push the results
    /// into the registry via the metrics-only path.
    pub fn tick(
        &mut self,
        now_ms: f64,
        workload: &mut dyn WorkloadProbe,
        registry: &ProcessRegistry,
    ) {
        let Self { samplers, rng, .. } = self;

        for (id, sampler) in samplers.iter_mut() {
            if now_ms < sampler.next_sample_ms {
                continue;
            }
            sampler.next_sample_ms = now_ms + SAMPLE_INTERVAL_MS;

            let renders = workload.take_renders(id);
            let nodes = workload.node_count(id);

            // Memory jitter: occasionally flip the drift direction, then
            // walk the offset and re-clamp it into bounds
            if rng.gen::<f32>() > 0.8 {
                sampler.memory_trend = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            }
            sampler.memory_offset = (sampler.memory_offset
                + rng.gen_range(0.0..2.0) * sampler.memory_trend)
                .clamp(0.0, MEMORY_OFFSET_MAX_MB);

            let base = MEMORY_BASELINE_MB + nodes as f32 * MEMORY_PER_NODE_MB;
            let activity = renders as f32 * MEMORY_PER_RENDER_MB;
            let memory_mb = (base + sampler.memory_offset + activity).round();

            let idle = rng.gen_range(0.0..2.0);
            let active = renders as f32 * CPU_PER_RENDER + nodes as f32 / CPU_NODE_DIVISOR;
            let cpu_percent = (((idle + active) * 10.0).round() / 10.0).min(100.0);

            let uptime_secs = ((now_ms - sampler.start_ms) / 1000.0).max(0.0) as u64;

            registry.update_metrics(
                id,
                ProcessMetrics {
                    cpu_percent,
                    memory_mb,
                    uptime_secs,
                    node_count: nodes,
                },
            );
        }
    }
}
