/*!
 * Scheduler Trait
 * Interface every scheduling algorithm implements
 */

use super::stats::{SchedulerStats, TickReport};
use super::types::SchedulingPolicy;
use crate::core::types::{Pid, SchedulerResult, TimeMs};
use crate::notify::Notifier;
use crate::process::{CpuSlot, ProcessRecord};

/// One scheduling algorithm with its own queues
///
/// Instances never share queue storage, so several simulations can run side
/// by side. `tick` is not reentrant: call it once per step with a
/// monotonically increasing `now`.
pub trait Scheduler: Send {
    fn policy(&self) -> SchedulingPolicy;

    /// Accept a newly created process (elapsed 0, Ready)
    ///
    /// A pid that is queued, or was on the CPU after the last tick, is
    /// rejected with `DuplicateProcess`.
    fn admit(&mut self, process: ProcessRecord) -> SchedulerResult<()>;

    /// Advance the simulation by one tick at time `now`
    ///
    /// Completion notices go through `notifier`; delivery failures are
    /// logged and counted, never returned.
    fn tick(&mut self, now: TimeMs, cpu: &mut CpuSlot, notifier: &dyn Notifier) -> TickReport;

    /// Whether `pid` is waiting in any of this scheduler's queues
    fn contains(&self, pid: Pid) -> bool;

    /// Number of processes waiting (not counting the CPU slot)
    fn waiting(&self) -> usize;

    fn stats(&self) -> SchedulerStats;
}
