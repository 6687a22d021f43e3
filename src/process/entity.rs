/*!
 * Process Entity
 * Scheduling metadata and the per-quantum execution state machine
 */

use super::types::{ProcessDescriptor, ProcessError, ProcessResult, ProcessState};
use crate::core::types::{ParentPid, Pid, Ticks, Units};

/// A simulated process
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    ppid: ParentPid,
    pc: String,
    registers: u32,
    size: u32,
    resource_units: Units,
    quantum: u32,
    remaining_iterations: u32,
    state: ProcessState,
    executed_time: Ticks,
    dispatches: u32,
}

impl Process {
    pub fn from_descriptor(descriptor: ProcessDescriptor) -> Self {
        Self {
            pid: descriptor.pid,
            ppid: descriptor.ppid,
            pc: descriptor.pc,
            registers: descriptor.registers,
            size: descriptor.size,
            resource_units: descriptor.resource_units,
            quantum: descriptor.quantum,
            remaining_iterations: descriptor.iterations,
            state: ProcessState::Ready,
            executed_time: 0,
            dispatches: 0,
        }
    }

    /// Execute one quantum of `ticks` simulated time units
    ///
    /// Ready -> Running -> {Ready | Terminated}. Returns the state the
    /// process settled in.
    pub fn run(&mut self, ticks: Ticks) -> ProcessResult<ProcessState> {
        self.transition(ProcessState::Running)?;

        debug_assert!(self.remaining_iterations > 0, "ran a process with no iterations left");
        self.remaining_iterations = self.remaining_iterations.saturating_sub(1);
        self.executed_time += ticks;
        self.dispatches += 1;

        let next = if self.remaining_iterations == 0 {
            ProcessState::Terminated
        } else {
            ProcessState::Ready
        };
        self.transition(next)?;
        Ok(next)
    }

    fn transition(&mut self, next: ProcessState) -> ProcessResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn ppid(&self) -> ParentPid {
        self.ppid
    }

    pub fn pc(&self) -> &str {
        &self.pc
    }

    pub fn registers(&self) -> u32 {
        self.registers
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn resource_units(&self) -> Units {
        self.resource_units
    }

    #[inline]
    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    #[inline]
    pub fn remaining_iterations(&self) -> u32 {
        self.remaining_iterations
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn executed_time(&self) -> Ticks {
        self.executed_time
    }

    pub fn dispatches(&self) -> u32 {
        self.dispatches
    }

    #[inline]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }
}
