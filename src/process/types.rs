/*!
 * Process Types
 * The process record (PCB) the schedulers move between queues and the CPU
 */

use crate::core::types::{NotifyTarget, Pid, TimeMs};
use serde::{Deserialize, Serialize};

/// Process lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Waiting in a ready queue
    Ready,
    /// Occupying the CPU slot
    Running,
    /// Consumed its whole burst, about to be released
    Done,
}

/// Process control block
///
/// `total_time_ms` is fixed at creation. `elapsed_time_ms` only grows, one
/// tick at a time, and is clamped back to the total when the process finishes.
/// Records are only built through [`ProcessRecord::new`]; serialization is
/// one-way, for snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pid: Pid,
    total_time_ms: TimeMs,
    elapsed_time_ms: TimeMs,
    slice_start_ms: TimeMs,
    status: ProcessStatus,
    notify_target: NotifyTarget,
}

impl ProcessRecord {
    /// Create a freshly admitted record (elapsed 0, Ready)
    pub fn new(pid: Pid, total_time_ms: TimeMs, notify_target: NotifyTarget) -> Self {
        Self {
            pid,
            total_time_ms,
            elapsed_time_ms: 0,
            slice_start_ms: 0,
            status: ProcessStatus::Ready,
            notify_target,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn total_time_ms(&self) -> TimeMs {
        self.total_time_ms
    }

    #[inline]
    pub fn elapsed_time_ms(&self) -> TimeMs {
        self.elapsed_time_ms
    }

    #[inline]
    pub fn slice_start_ms(&self) -> TimeMs {
        self.slice_start_ms
    }

    #[inline]
    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    #[inline]
    pub fn notify_target(&self) -> NotifyTarget {
        self.notify_target
    }

    /// CPU time still owed, clamped at zero if elapsed ever overshoots
    #[inline]
    pub fn remaining_ms(&self) -> TimeMs {
        self.total_time_ms.saturating_sub(self.elapsed_time_ms)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed_time_ms >= self.total_time_ms
    }

    /// Time spent in the current slice as of `now`
    #[inline]
    pub fn slice_elapsed(&self, now: TimeMs) -> TimeMs {
        now.saturating_sub(self.slice_start_ms)
    }

    /// Accrue one tick of CPU time
    pub(crate) fn run_for(&mut self, tick_ms: TimeMs) {
        self.elapsed_time_ms = self.elapsed_time_ms.saturating_add(tick_ms);
    }

    /// Hand the CPU to this process and open a new slice
    pub(crate) fn start_slice(&mut self, now: TimeMs) {
        self.status = ProcessStatus::Running;
        self.slice_start_ms = now;
    }

    /// Keep running but restart the quantum clock
    pub(crate) fn renew_slice(&mut self, now: TimeMs) {
        self.slice_start_ms = now;
    }

    /// Back to a ready queue; elapsed time is untouched
    pub(crate) fn preempt(&mut self) {
        self.status = ProcessStatus::Ready;
    }

    pub(crate) fn finish(&mut self) {
        self.elapsed_time_ms = self.elapsed_time_ms.min(self.total_time_ms);
        self.status = ProcessStatus::Done;
    }
}
