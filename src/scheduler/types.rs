/*!
 * Scheduler Types
 * Policy selection and tick/quantum timing
 */

use crate::core::errors::SchedulerError;
use crate::core::types::{SchedulerResult, TimeMs};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reference quantum shared by Round-Robin and every MLFQ level
pub const DEFAULT_QUANTUM_MS: TimeMs = 500;

/// Reference tick size
pub const DEFAULT_TICK_MS: TimeMs = 100;

/// Scheduling algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// Preemptive FIFO rotation with a fixed quantum
    RoundRobin,
    /// Non-preemptive, least remaining time first
    ShortestJobFirst,
    /// Three-level feedback queue with conditional demotion
    Mlfq,
}

impl SchedulingPolicy {
    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::ShortestJobFirst => "shortest_job_first",
            Self::Mlfq => "mlfq",
        }
    }

    /// Whether the policy ever takes the CPU away from an unfinished process
    pub const fn is_preemptive(&self) -> bool {
        !matches!(self, Self::ShortestJobFirst)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "shortest_job_first" | "sjf" => Ok(Self::ShortestJobFirst),
            "mlfq" | "feedback" => Ok(Self::Mlfq),
            _ => Err(SchedulerError::InvalidPolicy(s.into())),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Tick size and quantum, fixed for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timing {
    tick_ms: TimeMs,
    quantum_ms: TimeMs,
}

impl Timing {
    pub fn new(tick_ms: TimeMs, quantum_ms: TimeMs) -> SchedulerResult<Self> {
        if tick_ms == 0 {
            return Err(SchedulerError::InvalidConfig("tick is zero".into()));
        }
        if quantum_ms < tick_ms {
            return Err(SchedulerError::InvalidConfig(
                format!("quantum {}ms shorter than tick {}ms", quantum_ms, tick_ms).into(),
            ));
        }
        Ok(Self {
            tick_ms,
            quantum_ms,
        })
    }

    #[inline(always)]
    pub const fn tick_ms(&self) -> TimeMs {
        self.tick_ms
    }

    #[inline(always)]
    pub const fn quantum_ms(&self) -> TimeMs {
        self.quantum_ms
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            quantum_ms: DEFAULT_QUANTUM_MS,
        }
    }
}

impl<'de> Deserialize<'de> for Timing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            tick_ms: TimeMs,
            quantum_ms: TimeMs,
        }

        let inner = Inner::deserialize(deserializer)?;
        Self::new(inner.tick_ms, inner.quantum_ms).map_err(serde::de::Error::custom)
    }
}
