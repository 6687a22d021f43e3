/*!
 * Scheduler Statistics
 * Track and report scheduler counters and per-process summaries
 */

use super::types::{Location, ProcessSummary, RunOutcome, SchedulerStats};
use super::Scheduler;
use crate::core::types::Units;
use crate::process::Process;
use serde::{Deserialize, Serialize};

/// Everything worth printing once a run has ended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub stats: SchedulerStats,
    pub processes: Vec<ProcessSummary>,
}

impl Scheduler {
    /// Get scheduler statistics snapshot
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            total_units: self.total_units,
            available_units: self.available_units,
            clock: self.clock,
            ..self.stats.clone()
        }
    }

    /// Terminated processes, in completion order
    pub fn completed(&self) -> &[ProcessSummary] {
        &self.completed
    }

    /// Units held by admitted, live processes
    pub fn units_in_use(&self) -> Units {
        self.arena
            .iter()
            .filter(|(_, location)| *location != Location::Waiting)
            .map(|(process, _)| process.resource_units())
            .sum()
    }

    pub fn summary(&self, outcome: RunOutcome) -> RunSummary {
        RunSummary {
            outcome,
            stats: self.stats(),
            processes: self.completed.clone(),
        }
    }

    pub(super) fn track_peak_usage(&mut self) {
        let in_use = self.total_units - self.available_units;
        self.stats.peak_units_in_use = self.stats.peak_units_in_use.max(in_use);
    }

    pub(super) fn record_completion(&mut self, process: &Process) {
        self.stats.completed += 1;
        self.completed.push(ProcessSummary {
            pid: process.pid(),
            ppid: process.ppid(),
            resource_units: process.resource_units(),
            dispatches: process.dispatches(),
            executed_time: process.executed_time(),
            completed_at: self.clock,
        });
    }
}
