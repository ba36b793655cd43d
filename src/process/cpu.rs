/*!
 * CPU Slot
 * Single-occupancy holder for the running process
 */

use super::types::ProcessRecord;
use crate::core::types::Pid;

/// The one CPU of the simulation
///
/// Ownership of a record moves in with [`CpuSlot::occupy`] and out with
/// [`CpuSlot::release`]; a record is never in a queue and here at once.
#[derive(Debug, Default)]
pub struct CpuSlot {
    current: Option<ProcessRecord>,
}

impl CpuSlot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&self) -> Option<&ProcessRecord> {
        self.current.as_ref()
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut ProcessRecord> {
        self.current.as_mut()
    }

    /// Pid of the running process
    pub fn pid(&self) -> Option<Pid> {
        self.current.as_ref().map(ProcessRecord::pid)
    }

    /// Place a record on the CPU. The slot must be idle.
    pub(crate) fn occupy(&mut self, process: ProcessRecord) {
        debug_assert!(
            self.current.is_none(),
            "CPU slot already holds pid {:?}",
            self.pid()
        );
        self.current = Some(process);
    }

    /// Take the running record off the CPU
    pub(crate) fn release(&mut self) -> Option<ProcessRecord> {
        self.current.take()
    }
}
