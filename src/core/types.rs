/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulated time in milliseconds since the start of the run
pub type TimeMs = u64;

/// Opaque handle identifying who is told about a completion (a connection id)
pub type NotifyTarget = u32;

/// Common result type for scheduler operations
pub type SchedulerResult<T> = Result<T, super::errors::SchedulerError>;

/// Common result type for completion delivery
pub type NotifyResult<T> = Result<T, super::errors::NotifyError>;

/// Common result type for configuration loading
pub type ConfigResult<T> = Result<T, super::errors::ConfigError>;
