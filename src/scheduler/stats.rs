/*!
 * Scheduler Statistics
 * Per-instance counters and per-tick reports
 */

use super::types::{SchedulingPolicy, Timing};
use crate::core::types::{Pid, TimeMs};
use serde::{Deserialize, Serialize};

/// Running totals kept by each scheduler instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub policy: SchedulingPolicy,
    pub tick_ms: TimeMs,
    pub quantum_ms: TimeMs,
    pub ticks: u64,
    pub dispatches: u64,
    pub preemptions: u64,
    pub demotions: u64,
    pub slice_renewals: u64,
    pub completions: u64,
    pub notify_failures: u64,
}

impl SchedulerStats {
    pub fn new(policy: SchedulingPolicy, timing: Timing) -> Self {
        Self {
            policy,
            tick_ms: timing.tick_ms(),
            quantum_ms: timing.quantum_ms(),
            ticks: 0,
            dispatches: 0,
            preemptions: 0,
            demotions: 0,
            slice_renewals: 0,
            completions: 0,
            notify_failures: 0,
        }
    }
}

/// What one call to `tick` did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub now_ms: TimeMs,
    /// Process that finished (and was released) this tick
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<Pid>,
    /// Process taken off the CPU with work left
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preempted: Option<Pid>,
    /// MLFQ level the preempted process was requeued into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demoted_to: Option<usize>,
    /// Quantum expired with nobody waiting; the slice was restarted
    pub slice_renewed: bool,
    /// Process placed on the CPU this tick
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatched: Option<Pid>,
    /// Occupant of the CPU once the tick is over
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<Pid>,
}

impl TickReport {
    pub(super) fn at(now_ms: TimeMs) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }
}
