/*!
 * Tick-driven CPU Scheduling Simulator
 * Round-Robin, Shortest-Job-First and MLFQ over a single simulated CPU
 */

pub mod core;
pub mod monitoring;
pub mod notify;
pub mod process;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{ConfigError, NotifyError, SchedulerError};
pub use crate::core::types::{NotifyTarget, Pid, TimeMs};
pub use monitoring::init_tracing;
pub use notify::{ChannelNotifier, Notifier, NullNotifier, ProcessMessage, RequestKind, StreamNotifier};
pub use process::{CpuSlot, ProcessRecord, ProcessStatus, ReadyQueue};
pub use scheduler::{
    Mlfq, RoundRobin, Scheduler, SchedulerStats, SchedulingPolicy, ShortestJobFirst, TickReport,
    Timing,
};
pub use simulation::{SimConfig, Simulation, SimulationSummary, TickDriver, Workload};
