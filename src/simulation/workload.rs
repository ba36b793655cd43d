/*!
 * Workloads
 * JSON descriptions of which processes arrive when
 */

use crate::core::errors::ConfigError;
use crate::core::types::{ConfigResult, NotifyTarget, Pid, TimeMs};
use crate::process::ProcessRecord;
use ahash::HashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One process of a workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub pid: Pid,
    pub burst_ms: TimeMs,
    #[serde(default)]
    pub arrival_ms: TimeMs,
    /// Defaults to the pid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_target: Option<NotifyTarget>,
}

impl WorkloadEntry {
    pub fn new(pid: Pid, burst_ms: TimeMs, arrival_ms: TimeMs) -> Self {
        Self {
            pid,
            burst_ms,
            arrival_ms,
            notify_target: None,
        }
    }

    pub fn target(&self) -> NotifyTarget {
        self.notify_target.unwrap_or(self.pid)
    }

    /// Fresh record for admission
    pub fn record(&self) -> ProcessRecord {
        ProcessRecord::new(self.pid, self.burst_ms, self.target())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub processes: Vec<WorkloadEntry>,
}

impl Workload {
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let workload: Self = serde_json::from_str(raw)?;
        workload.validate()?;
        Ok(workload)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Small mixed workload used when no file is given
    pub fn demo() -> Self {
        Self {
            processes: vec![
                WorkloadEntry::new(1, 1200, 0),
                WorkloadEntry::new(2, 300, 0),
                WorkloadEntry::new(3, 700, 200),
                WorkloadEntry::new(4, 2000, 400),
                WorkloadEntry::new(5, 100, 1000),
            ],
        }
    }

    /// Pids must be unique and bursts non-zero
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::default();
        for entry in &self.processes {
            if !seen.insert(entry.pid) {
                return Err(ConfigError::InvalidValue {
                    key: "pid".into(),
                    value: entry.pid.to_string().into(),
                });
            }
            if entry.burst_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("burst_ms of pid {}", entry.pid).into(),
                    value: "0".into(),
                });
            }
        }
        Ok(())
    }
}
