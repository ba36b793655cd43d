/*!
 * Simulation Configuration
 * Defaults, JSON files and SCHED_* environment overrides
 */

use crate::core::errors::ConfigError;
use crate::core::types::{ConfigResult, SchedulerResult, TimeMs};
use crate::scheduler::{SchedulingPolicy, Timing, DEFAULT_QUANTUM_MS, DEFAULT_TICK_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Default per-target completion channel depth
pub const DEFAULT_NOTIFY_CAPACITY: usize = 16;

/// Settings fixed for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub policy: SchedulingPolicy,
    pub tick_ms: TimeMs,
    pub quantum_ms: TimeMs,
    pub notify_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::RoundRobin,
            tick_ms: DEFAULT_TICK_MS,
            quantum_ms: DEFAULT_QUANTUM_MS,
            notify_capacity: DEFAULT_NOTIFY_CAPACITY,
        }
    }
}

impl SimConfig {
    /// Defaults overridden by the process environment
    ///
    /// Environment variables:
    /// - SCHED_POLICY: rr | sjf | mlfq (default: rr)
    /// - SCHED_TICK_MS: tick size (default: 100)
    /// - SCHED_QUANTUM_MS: quantum (default: 500)
    /// - SCHED_NOTIFY_CAPACITY: completion channel depth (default: 16)
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (keyed by SCHED_* names)
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = parse_var(&lookup, "SCHED_POLICY")? {
            self.policy = policy;
        }
        if let Some(tick_ms) = parse_var(&lookup, "SCHED_TICK_MS")? {
            self.tick_ms = tick_ms;
        }
        if let Some(quantum_ms) = parse_var(&lookup, "SCHED_QUANTUM_MS")? {
            self.quantum_ms = quantum_ms;
        }
        if let Some(capacity) = parse_var(&lookup, "SCHED_NOTIFY_CAPACITY")? {
            self.notify_capacity = capacity;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn timing(&self) -> SchedulerResult<Timing> {
        Timing::new(self.tick_ms, self.quantum_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.timing()?;
        if self.notify_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "notify_capacity".into(),
                value: "0".into(),
            });
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.into(),
                value: raw.as_str().into(),
            }),
    }
}
