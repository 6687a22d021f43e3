/*!
 * Admission Control
 * Resource-gated entry into the ready hierarchy
 */

use super::types::{Admission, Location, QueueLevel};
use super::Scheduler;
use crate::core::errors::SchedulerError;
use crate::monitoring::Event;
use crate::process::{Process, ProcessDescriptor};
use tracing::debug;

impl Scheduler {
    /// Admit a process into Q1, or park it in the waiting queue when the pool
    /// cannot cover its units
    ///
    /// A process whose units exceed the whole budget is still accepted; it
    /// waits and the run eventually reports a stall.
    pub fn admit(&mut self, process: Process) -> Result<Admission, SchedulerError> {
        let pid = process.pid();
        let units = process.resource_units();

        let zero_field = [
            ("resource_units", units),
            ("quantum", process.quantum()),
            ("iterations", process.remaining_iterations()),
        ]
        .into_iter()
        .find_map(|(field, value)| (value == 0).then_some(field));
        if let Some(field) = zero_field {
            return Err(SchedulerError::InvalidProcess { pid, field });
        }

        if units <= self.available_units {
            let handle = self
                .arena
                .insert(process, Location::Ready(QueueLevel::Q1))
                .ok_or(SchedulerError::DuplicatePid(pid))?;
            self.available_units -= units;
            self.ready[QueueLevel::Q1.index()].push_back(handle);
            self.stats.direct_admissions += 1;
            self.track_peak_usage();

            debug!(pid, units, available = self.available_units, "admitted to Q1");
            self.emit(Event::Admitted {
                pid,
                units,
                available: self.available_units,
            });
            Ok(Admission::Ready)
        } else {
            let handle = self
                .arena
                .insert(process, Location::Waiting)
                .ok_or(SchedulerError::DuplicatePid(pid))?;
            self.waiting.push_back(handle);

            debug!(pid, units, available = self.available_units, "parked in waiting queue");
            self.emit(Event::Waiting {
                pid,
                required: units,
                available: self.available_units,
            });
            Ok(Admission::Waiting)
        }
    }

    /// Build a process from a validated descriptor and admit it
    pub fn admit_descriptor(
        &mut self,
        descriptor: ProcessDescriptor,
    ) -> Result<Admission, SchedulerError> {
        self.admit(Process::from_descriptor(descriptor))
    }

    /// Move waiting processes into Q1 while the head fits the pool
    ///
    /// Strict FIFO: the scan stops at the first process that does not fit,
    /// even if a later one would. Returns the number admitted.
    pub fn drain_waiting(&mut self) -> usize {
        let mut admitted = 0;

        while let Some(&handle) = self.waiting.front() {
            let Some(process) = self.arena.get(handle) else {
                // Stale handle, nothing to admit
                self.waiting.pop_front();
                continue;
            };
            let pid = process.pid();
            let units = process.resource_units();
            if units > self.available_units {
                break;
            }

            self.waiting.pop_front();
            self.available_units -= units;
            self.arena
                .set_location(handle, Location::Ready(QueueLevel::Q1));
            self.ready[QueueLevel::Q1.index()].push_back(handle);
            self.stats.waiting_admissions += 1;
            self.track_peak_usage();
            admitted += 1;

            debug!(pid, units, available = self.available_units, "admitted from waiting queue");
            self.emit(Event::AdmittedFromWaiting {
                pid,
                units,
                available: self.available_units,
            });
        }

        admitted
    }

    /// Return a terminated process's units to the pool
    pub(super) fn release(&mut self, process: &Process) {
        let units = process.resource_units();
        self.available_units += units;
        debug_assert!(self.available_units <= self.total_units);

        debug!(pid = process.pid(), units, available = self.available_units, "units released");
        self.emit(Event::Released {
            pid: process.pid(),
            units,
            available: self.available_units,
        });
    }
}
