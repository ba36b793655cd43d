/*!
 * Process Module
 * Process records, ready queues and the CPU slot
 */

pub mod cpu;
pub mod queue;
pub mod types;

pub use cpu::CpuSlot;
pub use queue::ReadyQueue;
pub use types::{ProcessRecord, ProcessStatus};
