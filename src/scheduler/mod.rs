/*!
 * Scheduler Module
 * Tick-driven scheduling algorithms sharing one CPU slot
 */

mod dispatch;
pub mod mlfq;
pub mod round_robin;
pub mod sjf;
pub mod stats;
pub mod traits;
pub mod types;

// Re-export public API
pub use mlfq::{Mlfq, LOWEST_LEVEL, MLFQ_LEVELS};
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use stats::{SchedulerStats, TickReport};
pub use traits::Scheduler;
pub use types::{SchedulingPolicy, Timing, DEFAULT_QUANTUM_MS, DEFAULT_TICK_MS};

/// Build a boxed scheduler for `policy`
pub fn build(policy: SchedulingPolicy, timing: Timing) -> Box<dyn Scheduler> {
    match policy {
        SchedulingPolicy::RoundRobin => Box::new(RoundRobin::new(timing)),
        SchedulingPolicy::ShortestJobFirst => Box::new(ShortestJobFirst::new(timing)),
        SchedulingPolicy::Mlfq => Box::new(Mlfq::new(timing)),
    }
}
