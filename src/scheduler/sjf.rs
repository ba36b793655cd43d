/*!
 * Shortest-Job-First Scheduler
 * Non-preemptive, least remaining CPU time first
 */

use super::dispatch;
use super::stats::{SchedulerStats, TickReport};
use super::traits::Scheduler;
use super::types::{SchedulingPolicy, Timing};
use crate::core::errors::SchedulerError;
use crate::core::types::{Pid, SchedulerResult, TimeMs};
use crate::notify::Notifier;
use crate::process::{CpuSlot, ProcessRecord, ReadyQueue};
use log::{error, info};

/// Shortest-Job-First over a single ready queue
///
/// A running process is never interrupted; the quantum in `Timing` is
/// ignored. Selection happens only when the CPU is free.
pub struct ShortestJobFirst {
    timing: Timing,
    ready: ReadyQueue,
    /// CPU occupant as of the last tick
    on_cpu: Option<Pid>,
    stats: SchedulerStats,
}

impl ShortestJobFirst {
    pub fn new(timing: Timing) -> Self {
        info!(
            "Shortest-Job-First scheduler initialized: tick={}ms",
            timing.tick_ms()
        );
        Self {
            timing,
            ready: ReadyQueue::new(),
            on_cpu: None,
            stats: SchedulerStats::new(SchedulingPolicy::ShortestJobFirst, timing),
        }
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }

    /// Pid with the least remaining time; ties go to the earliest queued
    pub fn shortest(&self) -> Option<Pid> {
        // min_by_key keeps the first of equal minima
        self.ready
            .iter()
            .min_by_key(|p| p.remaining_ms())
            .map(ProcessRecord::pid)
    }
}

impl Default for ShortestJobFirst {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Scheduler for ShortestJobFirst {
    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::ShortestJobFirst
    }

    fn admit(&mut self, process: ProcessRecord) -> SchedulerResult<()> {
        if self.on_cpu == Some(process.pid()) {
            return Err(SchedulerError::DuplicateProcess(process.pid()));
        }
        self.ready.push_back(process)
    }

    fn tick(&mut self, now: TimeMs, cpu: &mut CpuSlot, notifier: &dyn Notifier) -> TickReport {
        let mut report = TickReport::at(now);
        self.stats.ticks += 1;

        dispatch::advance(
            now,
            self.timing,
            cpu,
            notifier,
            &mut self.stats,
            &mut report,
        );

        if cpu.is_idle() {
            if let Some(pid) = self.shortest() {
                match self.ready.remove(pid) {
                    // The slice start is stamped but never read: SJF has no quantum
                    Ok(next) => dispatch::dispatch(next, now, cpu, &mut self.stats, &mut report),
                    Err(e) => {
                        error!("Selected process {} vanished from ready queue: {}", pid, e);
                        debug_assert!(false, "selected process {} not in queue", pid);
                    }
                }
            }
        }

        report.running = cpu.pid();
        self.on_cpu = report.running;
        report
    }

    fn contains(&self, pid: Pid) -> bool {
        self.ready.contains(pid)
    }

    fn waiting(&self) -> usize {
        self.ready.len()
    }

    fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
