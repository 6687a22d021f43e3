/*!
 * Process Types
 * Common types for process lifecycle management
 */

use crate::core::types::{ParentPid, Pid, Units};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process is ready to run
    Ready,
    /// Process is consuming its quantum
    Running,
    /// Process has no iterations left (absorbing)
    Terminated,
}

impl ProcessState {
    /// Whether `self -> next` is a legal lifecycle transition
    #[inline]
    #[must_use]
    pub const fn can_transition_to(self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (Self::Ready, Self::Running)
                | (Self::Running, Self::Ready)
                | (Self::Running, Self::Terminated)
        )
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Terminated => "terminated",
        }
    }
}

/// Validated process descriptor as produced by the loader
///
/// All numeric fields except `ppid` are strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub pid: Pid,
    pub ppid: ParentPid,
    /// Opaque program counter label
    pub pc: String,
    pub registers: u32,
    pub size: u32,
    pub resource_units: Units,
    pub quantum: u32,
    pub iterations: u32,
}

impl ProcessDescriptor {
    /// Descriptor with placeholder metadata, useful when only scheduling
    /// attributes matter
    pub fn new(pid: Pid, resource_units: Units, quantum: u32, iterations: u32) -> Self {
        Self {
            pid,
            ppid: 0,
            pc: String::from("0"),
            registers: 1,
            size: 1,
            resource_units,
            quantum,
            iterations,
        }
    }
}
