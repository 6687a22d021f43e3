/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export ProcessError from process module
pub use crate::process::types::ProcessError;

/// Fatal configuration errors
///
/// These describe an unusable environment, never a single bad process.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Resource budget must be positive, got {0}")]
    #[diagnostic(
        code(config::invalid_budget),
        help("Processor and thread counts in the input header must both be greater than zero.")
    )]
    InvalidBudget(i64),

    #[error("Throughput factor must be at least 1, got {0}")]
    #[diagnostic(
        code(config::invalid_throughput),
        help("Set MLFQ_THROUGHPUT to a positive integer or leave it unset.")
    )]
    InvalidThroughput(i64),

    #[error("Promotion interval must be positive, got {0}")]
    #[diagnostic(
        code(config::invalid_promotion_interval),
        help("Set MLFQ_PROMOTION_INTERVAL to a positive integer or leave it unset.")
    )]
    InvalidPromotionInterval(i64),

    #[error("Malformed header on line {line}: {reason}")]
    #[diagnostic(
        code(config::malformed_header),
        help("The first two lines must read '<label> <count>', e.g. 'Procesadores 2' and 'Hilos 4'.")
    )]
    MalformedHeader { line: usize, reason: String },

    #[error("Invalid value for {var}: {value:?}")]
    #[diagnostic(code(config::invalid_env))]
    InvalidEnv { var: &'static str, value: String },

    #[error("Cannot read input {path}: {source}")]
    #[diagnostic(
        code(config::io),
        help("Check that the input file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Per-descriptor validation errors
///
/// Recoverable: the offending line is skipped and loading continues.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum DescriptorError {
    #[error("Expected {expected} fields, found {found}")]
    #[diagnostic(code(descriptor::field_count))]
    FieldCount { expected: usize, found: usize },

    #[error("Decimal value in field '{field}': {value}")]
    #[diagnostic(
        code(descriptor::decimal_value),
        help("All numeric fields are whole numbers.")
    )]
    DecimalValue { field: String, value: String },

    #[error("Non-numeric value in field '{field}': {value}")]
    #[diagnostic(code(descriptor::not_numeric))]
    NotNumeric { field: String, value: String },

    #[error("Value out of range in field '{field}': {value}")]
    #[diagnostic(code(descriptor::out_of_range))]
    OutOfRange { field: String, value: String },

    #[error("Field '{field}' must be positive, got {value}")]
    #[diagnostic(code(descriptor::non_positive))]
    NonPositive { field: String, value: i64 },

    #[error("Process with PID {0} already loaded")]
    #[diagnostic(
        code(descriptor::duplicate_pid),
        help("Only the first descriptor for a PID is kept.")
    )]
    DuplicatePid(Pid),
}

/// Scheduler-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SchedulerError {
    #[error("Process {0} is already scheduled")]
    #[diagnostic(
        code(scheduler::duplicate_pid),
        help("PIDs must be unique across a run.")
    )]
    DuplicatePid(Pid),

    #[error("Process {pid} has zero {field}")]
    #[diagnostic(
        code(scheduler::invalid_process),
        help("Resource units, quantum and iterations must all be at least 1.")
    )]
    InvalidProcess { pid: Pid, field: &'static str },

    #[error("Process handle {0} does not refer to a live process")]
    #[diagnostic(code(scheduler::unknown_handle))]
    UnknownHandle(usize),

    #[error("Process error: {0}")]
    #[diagnostic(code(scheduler::process))]
    Process(#[from] ProcessError),
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),
}
