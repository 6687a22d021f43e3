/*!
 * MLFQ Kernel Simulator Library
 * Three-level feedback queue scheduling with resource-aware admission
 */

pub mod config;
pub mod core;
pub mod loader;
pub mod monitoring;
pub mod process;
pub mod runtime;
pub mod scheduler;

// Re-exports
pub use config::{KernelConfig, ReporterKind};
pub use crate::core::errors::{ConfigError, DescriptorError, KernelError, SchedulerError};
pub use crate::core::types::{KernelResult, Pid, Ticks, Units};
pub use loader::{load_file, load_str, LoadReport, LoadedWorkload, RejectedLine};
pub use monitoring::{
    init_tracing, ConsoleReporter, Event, NullReporter, RecordingReporter, Reporter,
    TracingReporter,
};
pub use process::{Process, ProcessDescriptor, ProcessError, ProcessState};
pub use runtime::{run_paced, PacedRun};
pub use scheduler::{
    Admission, Cycle, Dispatch, Location, ProcessSummary, QueueLevel, RunOutcome, RunSummary,
    Scheduler, SchedulerBuilder, SchedulerStats,
};
