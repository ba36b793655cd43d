/*!
 * Multi-Level Feedback Queue Scheduler
 * Three priority levels, identical quantum, demotion only under contention
 *
 * Rules:
 * - New work enters level 0 (drained from the arrivals queue every tick)
 * - Selection scans level 0, then 1, then 2, taking the first front
 * - A process that uses up its quantum while anyone else waits (at any level)
 *   is requeued one level lower; level 2 stays at level 2
 * - If nobody waits, the process keeps the CPU and its slice restarts, with
 *   no demotion
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

/// Number of priority levels
pub const MLFQ_LEVELS: usize = 3;

/// Lowest priority level
pub const LOWEST_LEVEL: usize = MLFQ_LEVELS - 1;

/// Three-level feedback queue scheduler
pub struct Mlfq {
    timing: Timing,
    arrivals: ReadyQueue,
    levels: [ReadyQueue; MLFQ_LEVELS],
    running_level: usize,
    /// CPU occupant as of the last tick
    on_cpu: Option<Pid>,
    stats: SchedulerStats,
}

impl Mlfq {
    pub fn new(timing: Timing) -> Self {
        info!(
            "MLFQ scheduler initialized: {} levels, tick={}ms, quantum={}ms",
            MLFQ_LEVELS,
            timing.tick_ms(),
            timing.quantum_ms()
        );
        Self {
            timing,
            arrivals: ReadyQueue::new(),
            levels: Default::default(),
            running_level: 0,
            on_cpu: None,
            stats: SchedulerStats::new(SchedulingPolicy::Mlfq, timing),
        }
    }

    /// Queue for `level` (0 = highest priority)
    ///
    /// # Panics
    /// If `level >= MLFQ_LEVELS`.
    pub fn level(&self, level: usize) -> &ReadyQueue {
        &self.levels[level]
    }

    /// Processes admitted since the last tick
    pub fn arrivals(&self) -> &ReadyQueue {
        &self.arrivals
    }

    /// Level the CPU occupant was drawn from
    pub fn running_level(&self) -> usize {
        self.running_level
    }

    /// Level currently holding `pid`, if it is waiting in one
    pub fn level_of(&self, pid: Pid) -> Option<usize> {
        self.levels.iter().position(|q| q.contains(pid))
    }

    fn any_waiting(&self) -> bool {
        self.levels.iter().any(|q| !q.is_empty())
    }

    fn drain_arrivals(&mut self) {
        let [top, ..] = &mut self.levels;
        for process in self.arrivals.drain() {
            dispatch::enqueue(top, process);
        }
    }

    /// Front of the highest non-empty level, with the level it came from
    fn next_ready(&mut self) -> Option<(usize, ProcessRecord)> {
        self.levels
            .iter_mut()
            .enumerate()
            .find_map(|(level, queue)| queue.pop_front().map(|p| (level, p)))
    }
}

impl Default for Mlfq {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Scheduler for Mlfq {
    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::Mlfq
    }

    fn admit(&mut self, process: ProcessRecord) -> SchedulerResult<()> {
        if self.on_cpu == Some(process.pid()) || self.level_of(process.pid()).is_some() {
            return Err(SchedulerError::DuplicateProcess(process.pid()));
        }
        self.arrivals.push_back(process)
    }

    fn tick(&mut self, now: TimeMs, cpu: &mut CpuSlot, notifier: &dyn Notifier) -> TickReport {
        let mut report = TickReport::at(now);
        self.stats.ticks += 1;

        self.drain_arrivals();

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
            if !self.any_waiting() {
                dispatch::renew(now, cpu, &mut self.stats, &mut report);
            } else if let Some(process) = dispatch::preempt(cpu, &mut self.stats, &mut report) {
                let target = (self.running_level + 1).min(LOWEST_LEVEL);
                let pid = process.pid();
                if dispatch::requeue(
                    &mut self.levels[target],
                    process,
                    now,
                    cpu,
                    &mut self.stats,
                    &mut report,
                ) {
                    if target != self.running_level {
                        self.stats.demotions += 1;
                    }
                    info!(
                        "Process {} preempted at {}ms, level {} -> {}",
                        pid, now, self.running_level, target
                    );
                    report.demoted_to = Some(target);
                }
            }
        }

        if cpu.is_idle() {
            if let Some((level, next)) = self.next_ready() {
                self.running_level = level;
                dispatch::dispatch(next, now, cpu, &mut self.stats, &mut report);
            }
        }

        report.running = cpu.pid();
        self.on_cpu = report.running;
        report
    }

    fn contains(&self, pid: Pid) -> bool {
        self.arrivals.contains(pid) || self.level_of(pid).is_some()
    }

    fn waiting(&self) -> usize {
        self.arrivals.len() + self.levels.iter().map(ReadyQueue::len).sum::<usize>()
    }

    fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
