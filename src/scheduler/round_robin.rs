/*!
 * Round-Robin Scheduler
 * Preemptive FIFO rotation with a fixed quantum
 */

use super::dispatch::{self, Progress};
use super::stats::{SchedulerStats, TickReport};
use super::traits::Scheduler;
use super::types::{SchedulingPolicy, Timing};
use crate::core::errors::SchedulerError;
use crate::core::types::{Pid, SchedulerResult, TimeMs};
use crate::notify::Notifier;
use crate::process::{CpuSlot, ProcessRecord, ReadyQueue};
use log::info;

/// Round-Robin over a single ready queue
///
/// When the quantum runs out the process goes to the back of the queue, but
/// only if someone is waiting; otherwise it keeps the CPU with a fresh slice.
pub struct RoundRobin {
    timing: Timing,
    ready: ReadyQueue,
    /// CPU occupant as of the last tick
    on_cpu: Option<Pid>,
    stats: SchedulerStats,
}

impl RoundRobin {
    pub fn new(timing: Timing) -> Self {
        info!(
            "Round-Robin scheduler initialized: tick={}ms, quantum={}ms",
            timing.tick_ms(),
            timing.quantum_ms()
        );
        Self {
            timing,
            ready: ReadyQueue::new(),
            on_cpu: None,
            stats: SchedulerStats::new(SchedulingPolicy::RoundRobin, timing),
        }
    }

    /// The ready queue, front first
    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Scheduler for RoundRobin {
    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::RoundRobin
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

        let progress = dispatch::advance(
            now,
            self.timing,
            cpu,
            notifier,
            &mut self.stats,
            &mut report,
        );

        if matches!(progress, Progress::Running) && dispatch::quantum_expired(now, self.timing, cpu)
        {
            if self.ready.is_empty() {
                dispatch::renew(now, cpu, &mut self.stats, &mut report);
            } else if let Some(process) = dispatch::preempt(cpu, &mut self.stats, &mut report) {
                let pid = process.pid();
                let waiting = self.ready.len();
                if dispatch::requeue(
                    &mut self.ready,
                    process,
                    now,
                    cpu,
                    &mut self.stats,
                    &mut report,
                ) {
                    info!("Process {} preempted at {}ms, {} waiting", pid, now, waiting);
                }
            }
        }

        if cpu.is_idle() {
            if let Some(next) = self.ready.pop_front() {
                dispatch::dispatch(next, now, cpu, &mut self.stats, &mut report);
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
