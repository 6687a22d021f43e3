/*!
 * Scheduler Types
 * Queue levels, process locations, and cycle outcomes
 */

use crate::core::types::{ParentPid, Pid, Ticks, Units};
use crate::process::ProcessState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ready queue level, Q1 being the highest priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueLevel {
    Q1,
    Q2,
    Q3,
}

impl QueueLevel {
    /// Levels in dispatch order
    pub const ALL: [QueueLevel; 3] = [QueueLevel::Q1, QueueLevel::Q2, QueueLevel::Q3];

    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Self::Q1 => 0,
            Self::Q2 => 1,
            Self::Q3 => 2,
        }
    }

    /// Level a non-finished process is requeued at; Q3 is the floor
    #[inline]
    pub const fn demoted(self) -> Self {
        match self {
            Self::Q1 => Self::Q2,
            Self::Q2 | Self::Q3 => Self::Q3,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
        }
    }
}

impl fmt::Display for QueueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a live process currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Ready(QueueLevel),
    Waiting,
    /// Only observable inside a dispatch
    Running,
}

/// Result of admitting a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Units granted, process appended to Q1
    Ready,
    /// Not enough units, process appended to the waiting queue
    Waiting,
}

/// One completed dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub pid: Pid,
    /// Level the process was taken from
    pub level: QueueLevel,
    /// Ticks billed to the clock
    pub charge: Ticks,
    pub state: ProcessState,
    /// Level the process went back to, `None` once terminated
    pub requeued: Option<QueueLevel>,
}

/// Outcome of a single scheduling cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    Dispatched(Dispatch),
    /// Nothing ready while processes are still waiting for units
    Idle,
    /// No process left anywhere
    Drained,
}

/// Terminal outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Drained { clock: Ticks },
    /// Waiting processes that no future release can admit
    Stalled { clock: Ticks, waiting: Vec<Pid> },
}

impl RunOutcome {
    #[inline]
    pub const fn is_drained(&self) -> bool {
        matches!(self, RunOutcome::Drained { .. })
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Drained { .. } => "drained",
            RunOutcome::Stalled { .. } => "stalled",
        }
    }
}

/// Record kept for a process after it terminated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub pid: Pid,
    pub ppid: ParentPid,
    pub resource_units: Units,
    pub dispatches: u32,
    pub executed_time: Ticks,
    /// Clock value right after the final quantum
    pub completed_at: Ticks,
}

/// Scheduler statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub dispatches: u64,
    pub promotions: u64,
    pub direct_admissions: u64,
    pub waiting_admissions: u64,
    pub completed: u64,
    pub peak_units_in_use: Units,
    pub total_units: Units,
    pub available_units: Units,
    pub clock: Ticks,
}
