/*!
 * Scheduler Invariant Tests
 * Property checks over random workloads for every policy
 */

use crate::support::{reference_timing, Recorder};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use sched_sim::notify::RequestKind;
use sched_sim::scheduler::MLFQ_LEVELS;
use sched_sim::{
    CpuSlot, Mlfq, Pid, ProcessRecord, ProcessStatus, RoundRobin, Scheduler, ShortestJobFirst,
    TimeMs,
};
use std::collections::HashMap;

const TICK: TimeMs = 100;

/// Read access to every waiting record of a scheduler
trait Queued {
    fn queued(&self) -> Vec<&ProcessRecord>;
}

impl Queued for RoundRobin {
    fn queued(&self) -> Vec<&ProcessRecord> {
        self.ready_queue().iter().collect()
    }
}

impl Queued for ShortestJobFirst {
    fn queued(&self) -> Vec<&ProcessRecord> {
        self.ready_queue().iter().collect()
    }
}

impl Queued for Mlfq {
    fn queued(&self) -> Vec<&ProcessRecord> {
        let mut all: Vec<&ProcessRecord> = self.arrivals().iter().collect();
        for level in 0..MLFQ_LEVELS {
            all.extend(self.level(level).iter());
        }
        all
    }
}

/// (burst ticks, arrival ticks) per job; pid = index + 1
fn jobs() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((1u64..=15, 0u64..=20), 1..8)
}

fn jobs_at_zero() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..=15, 1..8)
}

/// Drive `scheduler` over `jobs`, checking invariants after every tick.
/// Returns the completion time of each pid.
fn drive<S: Scheduler + Queued>(
    mut scheduler: S,
    jobs: &[(u64, u64)],
) -> Result<HashMap<Pid, TimeMs>, TestCaseError> {
    let recorder = Recorder::default();
    let mut cpu = CpuSlot::new();
    let mut last_elapsed: HashMap<Pid, TimeMs> = HashMap::new();
    let mut done: HashMap<Pid, TimeMs> = HashMap::new();

    let total_work: TimeMs = jobs.iter().map(|(burst, _)| burst * TICK).sum();
    let last_arrival = jobs.iter().map(|(_, arrival)| arrival * TICK).max().unwrap_or(0);
    let horizon = last_arrival + total_work + 2 * TICK;

    let mut now = 0;
    while now <= horizon {
        for (i, (burst, arrival)) in jobs.iter().enumerate() {
            if arrival * TICK == now {
                let pid = i as Pid + 1;
                scheduler
                    .admit(ProcessRecord::new(pid, burst * TICK, pid))
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
            }
        }

        let report = scheduler.tick(now, &mut cpu, &recorder);
        if let Some(pid) = report.completed {
            prop_assert!(done.insert(pid, now).is_none(), "pid {} completed twice", pid);
        }

        let queued = scheduler.queued();
        prop_assert!(queued.iter().all(|p| p.status() == ProcessStatus::Ready));
        if let Some(running) = cpu.current() {
            prop_assert_eq!(running.status(), ProcessStatus::Running);
            prop_assert!(!queued.iter().any(|p| p.pid() == running.pid()));
        }

        for p in queued.iter().copied().chain(cpu.current()) {
            prop_assert!(p.elapsed_time_ms() < p.total_time_ms());
            let previous = last_elapsed.insert(p.pid(), p.elapsed_time_ms()).unwrap_or(0);
            prop_assert!(p.elapsed_time_ms() >= previous);
        }

        now += TICK;
    }

    prop_assert!(cpu.is_idle());
    prop_assert_eq!(scheduler.waiting(), 0);
    prop_assert_eq!(done.len(), jobs.len());

    let messages = recorder.messages();
    prop_assert_eq!(messages.len(), jobs.len());
    for (target, message) in messages {
        prop_assert_eq!(message.request, RequestKind::Done);
        prop_assert_eq!(target, message.pid);
        prop_assert_eq!(done.get(&message.pid).copied(), Some(message.time_ms));
    }

    for (i, (burst, arrival)) in jobs.iter().enumerate() {
        let finished = done[&(i as Pid + 1)];
        prop_assert!(finished >= (arrival + burst) * TICK);
    }

    Ok(done)
}

fn all_at_zero(bursts: &[u64]) -> Vec<(u64, u64)> {
    bursts.iter().map(|&b| (b, 0)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_robin_invariants(jobs in jobs()) {
        drive(RoundRobin::new(reference_timing()), &jobs)?;
    }

    #[test]
    fn prop_sjf_invariants(jobs in jobs()) {
        drive(ShortestJobFirst::new(reference_timing()), &jobs)?;
    }

    #[test]
    fn prop_mlfq_invariants(jobs in jobs()) {
        drive(Mlfq::new(reference_timing()), &jobs)?;
    }

    #[test]
    fn prop_cpu_never_idles_with_work(bursts in jobs_at_zero()) {
        let jobs = all_at_zero(&bursts);
        let total: TimeMs = bursts.iter().sum::<u64>() * TICK;

        for done in [
            drive(RoundRobin::new(reference_timing()), &jobs)?,
            drive(ShortestJobFirst::new(reference_timing()), &jobs)?,
            drive(Mlfq::new(reference_timing()), &jobs)?,
        ] {
            prop_assert_eq!(done.values().copied().max(), Some(total));
        }
    }

    #[test]
    fn prop_sjf_finishes_shortest_first(bursts in jobs_at_zero()) {
        let done = drive(ShortestJobFirst::new(reference_timing()), &all_at_zero(&bursts))?;

        let mut expected: Vec<Pid> = (1..=bursts.len() as Pid).collect();
        expected.sort_by_key(|pid| bursts[*pid as usize - 1]);

        let mut actual: Vec<Pid> = done.keys().copied().collect();
        actual.sort_by_key(|pid| done[pid]);

        prop_assert_eq!(actual, expected);
    }
}
