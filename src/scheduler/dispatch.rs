/*!
 * Shared Tick Steps
 * CPU accounting, completion, preemption and dispatch used by every policy
 */

use super::stats::{SchedulerStats, TickReport};
use super::types::Timing;
use crate::core::types::TimeMs;
use crate::notify::{Notifier, ProcessMessage};
use crate::process::{CpuSlot, ProcessRecord, ReadyQueue};
use log::{debug, error, info, warn};

/// State of the CPU after charging the running process one tick
pub(super) enum Progress {
    /// Nothing was running
    Idle,
    /// The running process finished and was released
    Completed,
    /// The running process still has work left
    Running,
}

/// Charge the running process one tick and retire it if it is done
pub(super) fn advance(
    now: TimeMs,
    timing: Timing,
    cpu: &mut CpuSlot,
    notifier: &dyn Notifier,
    stats: &mut SchedulerStats,
    report: &mut TickReport,
) -> Progress {
    let Some(process) = cpu.current_mut() else {
        return Progress::Idle;
    };

    process.run_for(timing.tick_ms());
    if !process.is_complete() {
        return Progress::Running;
    }

    if let Some(process) = cpu.release() {
        complete(process, now, notifier, stats, report);
    }
    Progress::Completed
}

/// Send the completion notice and drop the record
///
/// A failed send is reported and otherwise ignored.
fn complete(
    mut process: ProcessRecord,
    now: TimeMs,
    notifier: &dyn Notifier,
    stats: &mut SchedulerStats,
    report: &mut TickReport,
) {
    process.finish();
    let pid = process.pid();
    let message = ProcessMessage::done(pid, now);

    if let Err(e) = notifier.notify(process.notify_target(), &message) {
        stats.notify_failures += 1;
        warn!(
            "Completion notice for process {} (target {}) not delivered: {}",
            pid,
            process.notify_target(),
            e
        );
    }

    stats.completions += 1;
    report.completed = Some(pid);
    info!(
        "Process {} finished at {}ms after {}ms of CPU",
        pid,
        now,
        process.elapsed_time_ms()
    );
}

/// Whether the running process has used up its quantum
pub(super) fn quantum_expired(now: TimeMs, timing: Timing, cpu: &CpuSlot) -> bool {
    cpu.current()
        .map(|p| p.slice_elapsed(now) >= timing.quantum_ms())
        .unwrap_or(false)
}

/// Nobody is waiting: restart the slice instead of switching
pub(super) fn renew(
    now: TimeMs,
    cpu: &mut CpuSlot,
    stats: &mut SchedulerStats,
    report: &mut TickReport,
) {
    if let Some(process) = cpu.current_mut() {
        process.renew_slice(now);
        stats.slice_renewals += 1;
        report.slice_renewed = true;
        debug!("Process {} keeps the CPU, slice renewed at {}ms", process.pid(), now);
    }
}

/// Take the running process off the CPU, marked Ready
pub(super) fn preempt(
    cpu: &mut CpuSlot,
    stats: &mut SchedulerStats,
    report: &mut TickReport,
) -> Option<ProcessRecord> {
    let mut process = cpu.release()?;
    process.preempt();
    stats.preemptions += 1;
    report.preempted = Some(process.pid());
    Some(process)
}

/// Move a newly arrived record into `queue`
///
/// A pid that is already queued was admitted twice; the newer record is
/// discarded.
pub(super) fn enqueue(queue: &mut ReadyQueue, process: ProcessRecord) {
    if let Err(rejected) = queue.try_push_back(process) {
        error!("Duplicate arrival of process {} discarded", rejected.pid());
    }
}

/// Queue a preempted record, or hand the CPU back to it
///
/// If `queue` already holds the pid the preemption is undone and the record
/// keeps the CPU with a renewed slice. Returns whether it was queued.
pub(super) fn requeue(
    queue: &mut ReadyQueue,
    process: ProcessRecord,
    now: TimeMs,
    cpu: &mut CpuSlot,
    stats: &mut SchedulerStats,
    report: &mut TickReport,
) -> bool {
    let Err(mut process) = queue.try_push_back(process) else {
        return true;
    };

    error!(
        "Process {} is already queued, it keeps the CPU at {}ms",
        process.pid(),
        now
    );
    stats.preemptions = stats.preemptions.saturating_sub(1);
    report.preempted = None;
    process.start_slice(now);
    cpu.occupy(process);
    stats.slice_renewals += 1;
    report.slice_renewed = true;
    false
}

/// Place `process` on the idle CPU and open its slice
pub(super) fn dispatch(
    mut process: ProcessRecord,
    now: TimeMs,
    cpu: &mut CpuSlot,
    stats: &mut SchedulerStats,
    report: &mut TickReport,
) {
    process.start_slice(now);
    report.dispatched = Some(process.pid());
    stats.dispatches += 1;
    debug!(
        "Dispatched process {} at {}ms ({}ms remaining)",
        process.pid(),
        now,
        process.remaining_ms()
    );
    cpu.occupy(process);
}
