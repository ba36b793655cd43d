/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::inline_string::InlineString;
use super::types::{NotifyTarget, Pid};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Process {0} is already queued or running")]
    #[diagnostic(
        code(scheduler::duplicate_process),
        help("Each admitted process needs a pid that is not currently tracked.")
    )]
    DuplicateProcess(Pid),

    #[error("Process {0} not found in ready queue")]
    #[diagnostic(
        code(scheduler::element_not_found),
        help("The record was already dispatched or released. This is a caller bug.")
    )]
    ElementNotFound(Pid),

    #[error("Unexpected request: {0}")]
    #[diagnostic(
        code(scheduler::invalid_request),
        help("Only Run requests admit new processes.")
    )]
    InvalidRequest(InlineString),

    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use rr, sjf or mlfq.")
    )]
    InvalidPolicy(InlineString),

    #[error("Invalid scheduler configuration: {0}")]
    #[diagnostic(
        code(scheduler::invalid_config),
        help("Tick and quantum must be non-zero and the quantum at least one tick long.")
    )]
    InvalidConfig(InlineString),
}

/// Completion delivery errors
///
/// None of these abort a tick: the scheduler logs them and releases the
/// process record anyway.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum NotifyError {
    #[error("Notification target {0} is not registered")]
    #[diagnostic(code(notify::unknown_target))]
    UnknownTarget(NotifyTarget),

    #[error("Notification target {0} disconnected")]
    #[diagnostic(
        code(notify::disconnected),
        help("The receiving side was dropped before the process finished.")
    )]
    Disconnected(NotifyTarget),

    #[error("Notification channel for target {0} is full")]
    #[diagnostic(
        code(notify::full),
        help("The receiver is not draining completions. Messages are never retried.")
    )]
    Full(NotifyTarget),

    #[error("Short write to target {target}: {written} of {expected} bytes")]
    #[diagnostic(code(notify::partial_write))]
    PartialWrite {
        target: NotifyTarget,
        written: usize,
        expected: usize,
    },

    #[error("Failed to encode message: {0}")]
    #[diagnostic(code(notify::encode))]
    Encode(InlineString),

    #[error("I/O error on target {target}: {message}")]
    #[diagnostic(code(notify::io))]
    Io {
        target: NotifyTarget,
        message: InlineString,
    },
}

/// Configuration and workload loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    #[diagnostic(
        code(config::io_error),
        help("Check that the file exists and is readable.")
    )]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    #[diagnostic(code(config::parse_error))]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: InlineString, value: InlineString },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),
}
