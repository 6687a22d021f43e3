/*!
 * Structured Tracing
 * Subscriber initialisation and run-level spans using the tracing crate
 *
 * Features:
 * - Trace ID per scheduler run for log correlation
 * - JSON-formatted logs for structured parsing
 * - Run summary fields recorded on span close
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - MLFQ_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("MLFQ_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique trace ID for run correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one complete scheduler run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl RunSpan {
    pub fn new(processes: usize, budget: u32) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "scheduler_run",
            trace_id = %trace_id,
            processes = processes,
            budget = budget,
            dispatches = tracing::field::Empty,
            clock = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record the final dispatch count, simulated clock and outcome
    pub fn record_finish(&self, dispatches: u64, clock: u64, outcome: &str) {
        self.span.record("dispatches", dispatches);
        self.span.record("clock", clock);
        self.span.record("outcome", outcome);
    }

    /// Underlying span, for instrumenting futures
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        debug!(
            trace_id = %self.trace_id,
            wall_us = self.start.elapsed().as_micros() as u64,
            "scheduler run finished"
        );
    }
}

/// Helper to create a run span
#[inline]
pub fn span_run(processes: usize, budget: u32) -> RunSpan {
    RunSpan::new(processes, budget)
}
