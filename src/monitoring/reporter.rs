/*!
 * Scheduler Event Reporting
 * Human-readable and structured sinks for scheduler events
 *
 * Reporters are pure sinks: they observe, they never influence scheduling.
 */

use crate::core::types::{Pid, Ticks, Units};
use crate::scheduler::QueueLevel;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use tracing::{debug, error, info};

/// Event emitted by the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Admitted straight into Q1
    Admitted { pid: Pid, units: Units, available: Units },
    /// Not enough units, parked in the waiting queue
    Waiting { pid: Pid, required: Units, available: Units },
    /// Left the waiting queue for Q1
    AdmittedFromWaiting { pid: Pid, units: Units, available: Units },
    /// Q2 and Q3 moved to Q1
    Promoted { clock: Ticks, moved: usize },
    /// Process picked for execution
    Dispatched { pid: Pid, level: QueueLevel, charge: Ticks },
    /// Quantum completed with iterations left
    Progress { pid: Pid, ticks: Ticks, remaining: u32 },
    Terminated { pid: Pid, clock: Ticks },
    /// Units returned to the pool
    Released { pid: Pid, units: Units, available: Units },
    /// Every queue is empty
    Drained { clock: Ticks },
    /// Nothing ready and the waiting head can never be admitted
    Stalled { clock: Ticks, waiting: Vec<Pid> },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Admitted { pid, available, .. } => write!(
                f,
                "Adding process {} to the high-priority queue (available units: {})",
                pid, available
            ),
            Event::Waiting {
                pid,
                required,
                available,
            } => write!(
                f,
                "Process {} needs {} units, but only {} are available. Placing it in the waiting queue",
                pid, required, available
            ),
            Event::AdmittedFromWaiting { pid, available, .. } => write!(
                f,
                "Adding process {} from the waiting queue to the high-priority queue (available units: {})",
                pid, available
            ),
            Event::Promoted { clock, moved } => write!(
                f,
                "Promoting {} processes to the high-priority queue to avoid starvation (clock {})",
                moved, clock
            ),
            Event::Dispatched { pid, level, charge } => write!(
                f,
                "Running process {} from {} for {} ticks",
                pid, level, charge
            ),
            Event::Progress {
                pid,
                ticks,
                remaining,
            } => write!(
                f,
                "Process {} completed {} ticks of execution, {} iterations left",
                pid, ticks, remaining
            ),
            Event::Terminated { pid, clock } => {
                write!(f, "Process {} has terminated (clock {})", pid, clock)
            }
            Event::Released {
                pid,
                units,
                available,
            } => write!(
                f,
                "Released {} units from process {} (available units: {})",
                units, pid, available
            ),
            Event::Drained { clock } => write!(f, "All queues drained at clock {}", clock),
            Event::Stalled { clock, waiting } => write!(
                f,
                "Scheduler stalled at clock {}: waiting processes {:?} can never be admitted",
                clock, waiting
            ),
        }
    }
}

/// Sink for scheduler events
pub trait Reporter: Send + Sync {
    fn report(&self, event: &Event);
}

/// Writes one human-readable line per event
pub struct ConsoleReporter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &Event) {
        let mut out = self.out.lock();
        // A closed stdout must not abort the simulation
        let _ = writeln!(out, "{}", event);
    }
}

/// Emits events as structured tracing records
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &Event) {
        match event {
            Event::Admitted {
                pid,
                units,
                available,
            } => info!(pid, units, available, "process admitted"),
            Event::Waiting {
                pid,
                required,
                available,
            } => info!(pid, required, available, "process waiting for units"),
            Event::AdmittedFromWaiting {
                pid,
                units,
                available,
            } => info!(pid, units, available, "process admitted from waiting queue"),
            Event::Promoted { clock, moved } => info!(clock, moved, "starvation promotion"),
            Event::Dispatched { pid, level, charge } => {
                debug!(pid, level = %level, charge, "process dispatched")
            }
            Event::Progress {
                pid,
                ticks,
                remaining,
            } => debug!(pid, ticks, remaining, "quantum completed"),
            Event::Terminated { pid, clock } => info!(pid, clock, "process terminated"),
            Event::Released {
                pid,
                units,
                available,
            } => debug!(pid, units, available, "units released"),
            Event::Drained { clock } => info!(clock, "scheduler drained"),
            Event::Stalled { clock, waiting } => {
                error!(clock, waiting = ?waiting, "scheduler stalled")
            }
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of events recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &Event) {}
}
