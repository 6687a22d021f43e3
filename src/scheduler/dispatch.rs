/*!
 * Dispatch and Demotion
 * Strict-priority selection, quantum execution and post-run routing
 */

use super::arena::Handle;
use super::types::{Dispatch, Location, QueueLevel};
use super::Scheduler;
use crate::core::errors::SchedulerError;
use crate::core::limits::MIN_CHARGE;
use crate::core::types::Ticks;
use crate::monitoring::Event;
use crate::process::{Process, ProcessState};
use tracing::debug;

/// Ticks billed for one quantum under a throughput factor
#[inline]
pub(super) fn charge_for(quantum: u32, throughput: u32) -> Ticks {
    (Ticks::from(quantum) / Ticks::from(throughput.max(1))).max(MIN_CHARGE)
}

impl Scheduler {
    /// Run the head of the highest non-empty ready queue for one quantum
    ///
    /// Terminated processes release their units and leave the arena; the
    /// rest drop one level (Q3 requeues at its own tail). Returns `None`
    /// when every ready queue is empty.
    pub fn dispatch_one(&mut self) -> Result<Option<Dispatch>, SchedulerError> {
        let Some((level, handle)) = self.pop_ready() else {
            return Ok(None);
        };

        let (pid, quantum) = self
            .arena
            .get(handle)
            .map(|p| (p.pid(), p.quantum()))
            .ok_or(SchedulerError::UnknownHandle(handle.index()))?;
        let charge = charge_for(quantum, self.throughput);

        self.arena.set_location(handle, Location::Running);
        let ran = self
            .arena
            .get_mut(handle)
            .ok_or(SchedulerError::UnknownHandle(handle.index()))?
            .run(charge);
        let state = match ran {
            Ok(state) => state,
            Err(e) => {
                // A refused run leaves the process untouched; put it back at the head
                self.arena.set_location(handle, Location::Ready(level));
                self.ready[level.index()].push_front(handle);
                return Err(e.into());
            }
        };

        self.emit(Event::Dispatched { pid, level, charge });
        self.clock += charge;
        self.stats.dispatches += 1;

        let requeued = match state {
            ProcessState::Terminated => {
                let process = self
                    .arena
                    .remove(handle)
                    .ok_or(SchedulerError::UnknownHandle(handle.index()))?;
                debug!(pid, clock = self.clock, "process terminated");
                self.emit(Event::Terminated {
                    pid,
                    clock: self.clock,
                });
                self.release(&process);
                self.record_completion(&process);
                None
            }
            _ => {
                let next = level.demoted();
                self.arena.set_location(handle, Location::Ready(next));
                self.ready[next.index()].push_back(handle);

                let remaining = self
                    .arena
                    .get(handle)
                    .map(Process::remaining_iterations)
                    .unwrap_or_default();
                debug!(pid, from = %level, to = %next, remaining, "process requeued");
                self.emit(Event::Progress {
                    pid,
                    ticks: charge,
                    remaining,
                });
                Some(next)
            }
        };

        Ok(Some(Dispatch {
            pid,
            level,
            charge,
            state,
            requeued,
        }))
    }

    /// Pop the head of Q1, else Q2, else Q3
    fn pop_ready(&mut self) -> Option<(QueueLevel, Handle)> {
        QueueLevel::ALL.into_iter().find_map(|level| {
            self.ready[level.index()]
                .pop_front()
                .map(|handle| (level, handle))
        })
    }
}
