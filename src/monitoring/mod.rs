/*!
 * Monitoring
 * Structured tracing and scheduler event reporting
 */

mod reporter;
mod tracer;

pub use reporter::{
    ConsoleReporter, Event, NullReporter, RecordingReporter, Reporter, TracingReporter,
};
pub use tracer::{generate_trace_id, init_tracing, span_run, RunSpan};
