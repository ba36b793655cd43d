/*!
 * Ready Queue
 * Ordered owner of process records waiting for the CPU
 */

use super::types::ProcessRecord;
use crate::core::errors::SchedulerError;
use crate::core::types::{Pid, SchedulerResult};
use ahash::HashSet;
use std::collections::VecDeque;

/// FIFO ready queue with order-preserving removal by pid
///
/// # Performance
/// - `push_back` / `pop_front`: O(1)
/// - `remove`: O(n) scan, the remainder keeps its relative order
/// - Membership index makes duplicate detection O(1)
#[derive(Debug, Default, Clone)]
pub struct ReadyQueue {
    entries: VecDeque<ProcessRecord>,
    members: HashSet<Pid>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; a pid already in the queue is rejected
    pub fn push_back(&mut self, process: ProcessRecord) -> SchedulerResult<()> {
        self.try_push_back(process)
            .map_err(|rejected| SchedulerError::DuplicateProcess(rejected.pid()))
    }

    /// Append a record, handing it back if its pid is already queued
    pub fn try_push_back(&mut self, process: ProcessRecord) -> Result<(), ProcessRecord> {
        if !self.members.insert(process.pid()) {
            return Err(process);
        }
        self.entries.push_back(process);
        Ok(())
    }

    /// Remove the earliest-inserted record, `None` when empty
    pub fn pop_front(&mut self) -> Option<ProcessRecord> {
        let process = self.entries.pop_front()?;
        self.members.remove(&process.pid());
        Some(process)
    }

    /// Extract a specific record from anywhere in the queue
    pub fn remove(&mut self, pid: Pid) -> SchedulerResult<ProcessRecord> {
        let index = self
            .position(pid)
            .ok_or(SchedulerError::ElementNotFound(pid))?;
        let process = self
            .entries
            .remove(index)
            .ok_or(SchedulerError::ElementNotFound(pid))?;
        self.members.remove(&pid);
        Ok(process)
    }

    /// Queue position of `pid` (0 = front)
    pub fn position(&self, pid: Pid) -> Option<usize> {
        if !self.members.contains(&pid) {
            return None;
        }
        self.entries.iter().position(|p| p.pid() == pid)
    }

    #[inline]
    pub fn contains(&self, pid: Pid) -> bool {
        self.members.contains(&pid)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn front(&self) -> Option<&ProcessRecord> {
        self.entries.front()
    }

    /// Read-only view in queue order
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> + '_ {
        self.entries.iter()
    }

    /// Pids in queue order
    pub fn pids(&self) -> Vec<Pid> {
        self.entries.iter().map(ProcessRecord::pid).collect()
    }

    /// Take every record out, front first
    pub fn drain(&mut self) -> impl Iterator<Item = ProcessRecord> + '_ {
        self.members.clear();
        self.entries.drain(..)
    }
}
