/*!
 * Simulation
 * Owns one scheduler, the CPU slot and the clock, and steps them tick by tick
 */

mod config;
mod driver;
mod workload;

pub use config::{SimConfig, DEFAULT_NOTIFY_CAPACITY};
pub use driver::{DriverCommand, TickDriver};
pub use workload::{Workload, WorkloadEntry};

use crate::core::errors::SchedulerError;
use crate::core::types::{NotifyTarget, Pid, SchedulerResult, TimeMs};
use crate::notify::{Notifier, ProcessMessage, RequestKind};
use crate::process::{CpuSlot, ProcessRecord};
use crate::scheduler::{self, Scheduler, SchedulerStats, SchedulingPolicy, TickReport, Timing};
use log::{error, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug_span;

/// A finished process and the tick it finished on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub pid: Pid,
    pub time_ms: TimeMs,
}

/// Outcome of [`Simulation::run_until_idle`]
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub policy: SchedulingPolicy,
    /// Clock value after the last step
    pub clock_ms: TimeMs,
    pub steps: u64,
    /// Stopped on the step limit with work still outstanding
    pub truncated: bool,
    pub completions: Vec<Completion>,
    pub stats: SchedulerStats,
}

/// Discrete-time driver around a single scheduler
///
/// Each [`step`](Self::step) admits arrivals that are due, calls the
/// scheduler's `tick` at the current time, then advances the clock by one
/// tick. The first step runs at time 0.
pub struct Simulation {
    scheduler: Box<dyn Scheduler>,
    cpu: CpuSlot,
    notifier: Arc<dyn Notifier>,
    timing: Timing,
    now: TimeMs,
    steps: u64,
    pending: BTreeMap<TimeMs, Vec<ProcessRecord>>,
    completions: Vec<Completion>,
}

impl Simulation {
    pub fn new(policy: SchedulingPolicy, timing: Timing, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_scheduler(scheduler::build(policy, timing), timing, notifier)
    }

    /// Wrap an already constructed scheduler
    pub fn with_scheduler(
        scheduler: Box<dyn Scheduler>,
        timing: Timing,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        info!(
            "Simulation created: policy={}, tick={}ms, quantum={}ms",
            scheduler.policy(),
            timing.tick_ms(),
            timing.quantum_ms()
        );
        Self {
            scheduler,
            cpu: CpuSlot::new(),
            notifier,
            timing,
            now: 0,
            steps: 0,
            pending: BTreeMap::new(),
            completions: Vec::new(),
        }
    }

    pub fn from_config(config: &SimConfig, notifier: Arc<dyn Notifier>) -> SchedulerResult<Self> {
        Ok(Self::new(config.policy, config.timing()?, notifier))
    }

    /// Current simulated time (the time the next step runs at)
    pub fn now(&self) -> TimeMs {
        self.now
    }

    pub fn cpu(&self) -> &CpuSlot {
        &self.cpu
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    /// Whether `pid` is anywhere in the system: CPU, queues or pending arrivals
    pub fn is_tracked(&self, pid: Pid) -> bool {
        self.cpu.pid() == Some(pid)
            || self.scheduler.contains(pid)
            || self
                .pending
                .values()
                .any(|batch| batch.iter().any(|p| p.pid() == pid))
    }

    /// Admit a new process right away
    pub fn admit(&mut self, process: ProcessRecord) -> SchedulerResult<()> {
        if self.is_tracked(process.pid()) {
            return Err(SchedulerError::DuplicateProcess(process.pid()));
        }
        info!(
            "Process {} admitted at {}ms ({}ms of CPU)",
            process.pid(),
            self.now,
            process.total_time_ms()
        );
        self.scheduler.admit(process)
    }

    /// Admit from a client `Run` request; `time_ms` is the CPU time wanted
    pub fn admit_message(
        &mut self,
        message: &ProcessMessage,
        target: NotifyTarget,
    ) -> SchedulerResult<()> {
        if message.request != RequestKind::Run {
            return Err(SchedulerError::InvalidRequest(
                format!("{:?} from pid {}", message.request, message.pid).into(),
            ));
        }
        self.admit(ProcessRecord::new(message.pid, message.time_ms, target))
    }

    /// Admit `process` once the clock reaches `arrival_ms`
    pub fn schedule_arrival(
        &mut self,
        arrival_ms: TimeMs,
        process: ProcessRecord,
    ) -> SchedulerResult<()> {
        if arrival_ms <= self.now {
            return self.admit(process);
        }
        if self.is_tracked(process.pid()) {
            return Err(SchedulerError::DuplicateProcess(process.pid()));
        }
        self.pending.entry(arrival_ms).or_default().push(process);
        Ok(())
    }

    /// Schedule every process of a workload
    pub fn load(&mut self, workload: &Workload) -> SchedulerResult<()> {
        for entry in &workload.processes {
            self.schedule_arrival(entry.arrival_ms, entry.record())?;
        }
        Ok(())
    }

    fn admit_due(&mut self) {
        let later = self.pending.split_off(&(self.now + 1));
        let due = std::mem::replace(&mut self.pending, later);
        for process in due.into_values().flatten() {
            let pid = process.pid();
            if let Err(e) = self.admit(process) {
                error!("Arrival of process {} dropped: {}", pid, e);
            }
        }
    }

    /// Run one tick at the current time and advance the clock
    pub fn step(&mut self) -> TickReport {
        let span = debug_span!("tick", now_ms = self.now);
        let _enter = span.enter();

        self.admit_due();
        let report = self
            .scheduler
            .tick(self.now, &mut self.cpu, self.notifier.as_ref());

        if let Some(pid) = report.completed {
            self.completions.push(Completion {
                pid,
                time_ms: self.now,
            });
        }

        self.steps += 1;
        self.now += self.timing.tick_ms();
        report
    }

    /// Nothing running, waiting or still to arrive
    pub fn is_idle(&self) -> bool {
        self.cpu.is_idle() && self.scheduler.waiting() == 0 && self.pending.is_empty()
    }

    /// Step until idle or until `max_steps` more steps have run
    pub fn run_until_idle(&mut self, max_steps: u64) -> SimulationSummary {
        let mut taken = 0;
        while !self.is_idle() && taken < max_steps {
            self.step();
            taken += 1;
        }
        let summary = self.summary();
        info!(
            "Simulation stopped at {}ms: {} completed, truncated={}",
            summary.clock_ms,
            summary.completions.len(),
            summary.truncated
        );
        summary
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            policy: self.scheduler.policy(),
            clock_ms: self.now,
            steps: self.steps,
            truncated: !self.is_idle(),
            completions: self.completions.clone(),
            stats: self.scheduler.stats(),
        }
    }
}
