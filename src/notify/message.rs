/*!
 * Process Messages
 * Admission requests and completion notifications exchanged with clients
 */

use crate::core::errors::NotifyError;
use crate::core::types::{NotifyResult, Pid, TimeMs};
use serde::{Deserialize, Serialize};

/// Encoded size of a [`ProcessMessage`]: u32 pid, u32 tag, u64 time
pub const MESSAGE_WIRE_SIZE: usize = 16;

/// What the message asks for or reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Client asks for `time_ms` of CPU
    Run,
    /// Scheduler reports the process finished at `time_ms`
    Done,
}

/// Fixed-layout message shared by the admission and completion paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMessage {
    pub pid: Pid,
    pub request: RequestKind,
    pub time_ms: TimeMs,
}

impl ProcessMessage {
    /// Admission request for `burst_ms` of CPU time
    pub fn run(pid: Pid, burst_ms: TimeMs) -> Self {
        Self {
            pid,
            request: RequestKind::Run,
            time_ms: burst_ms,
        }
    }

    /// Completion notice stamped with the finishing tick
    pub fn done(pid: Pid, now: TimeMs) -> Self {
        Self {
            pid,
            request: RequestKind::Done,
            time_ms: now,
        }
    }

    /// Fixed-size little-endian encoding
    pub fn encode(&self) -> NotifyResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| NotifyError::Encode(e.to_string().into()))
    }

    pub fn decode(bytes: &[u8]) -> NotifyResult<Self> {
        bincode::deserialize(bytes).map_err(|e| NotifyError::Encode(e.to_string().into()))
    }
}
