/*!
 * Scheduler Main Loop
 * Drain waiting, promote when due, dispatch; until drained
 */

use super::types::{Cycle, RunOutcome};
use super::Scheduler;
use crate::core::errors::SchedulerError;
use crate::monitoring::{span_run, Event};
use tracing::{error, info};

impl Scheduler {
    /// Execute one scheduling cycle
    ///
    /// `Cycle::Idle` means nothing is ready while the waiting head still
    /// lacks units. Only a terminating process releases units, so an idle
    /// cycle repeats forever once reached.
    pub fn step(&mut self) -> Result<Cycle, SchedulerError> {
        if self.is_drained() {
            return Ok(Cycle::Drained);
        }

        if !self.waiting.is_empty() {
            self.drain_waiting();
        }
        if self.promotion_due() {
            self.promote();
        }

        Ok(match self.dispatch_one()? {
            Some(dispatch) => Cycle::Dispatched(dispatch),
            None => Cycle::Idle,
        })
    }

    /// Run cycles until every queue is empty
    ///
    /// Stops early with `RunOutcome::Stalled` once a cycle goes idle. A
    /// plain polling loop would spin forever there: with nothing ready no
    /// process can terminate, so the waiting head never gains units. A
    /// stalled run therefore leaves processes unserved, and the binary
    /// exits with code 3 instead of hanging.
    pub fn run(&mut self) -> Result<RunOutcome, SchedulerError> {
        let span = span_run(self.len(), self.total_units);
        let _guard = span.enter();
        info!(trace_id = span.trace_id(), "Scheduler run started");

        loop {
            match self.step()? {
                Cycle::Dispatched(_) => {}
                Cycle::Idle | Cycle::Drained => break,
            }
        }

        let outcome = self.outcome();
        span.record_finish(self.stats.dispatches, self.clock, outcome.as_str());
        self.report_outcome(&outcome);
        Ok(outcome)
    }

    /// Outcome as of now: drained, or stalled on the waiting queue
    pub fn outcome(&self) -> RunOutcome {
        if self.is_drained() {
            RunOutcome::Drained { clock: self.clock }
        } else {
            RunOutcome::Stalled {
                clock: self.clock,
                waiting: self.waiting(),
            }
        }
    }

    /// Emit the terminal event for `outcome`
    pub fn report_outcome(&self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Drained { clock } => {
                info!(clock, dispatches = self.stats.dispatches, "Scheduler drained");
                self.emit(Event::Drained { clock: *clock });
            }
            RunOutcome::Stalled { clock, waiting } => {
                error!(
                    clock,
                    waiting = ?waiting,
                    available = self.available_units,
                    total = self.total_units,
                    "Scheduler stalled: waiting processes can never be admitted"
                );
                self.emit(Event::Stalled {
                    clock: *clock,
                    waiting: waiting.clone(),
                });
            }
        }
    }
}
