/*!
 * MLFQ Kernel Simulator - Main Entry Point
 *
 * Loads a workload file, admits every valid process and runs the
 * multilevel feedback queue scheduler until all queues drain.
 */

use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

use mlfq_kernel::{
    init_tracing, load_file, run_paced, ConsoleReporter, KernelConfig, KernelError, PacedRun,
    Reporter, ReporterKind, RunSummary, Scheduler, TracingReporter,
};

const EXIT_FATAL: u8 = 1;
const EXIT_STALLED: u8 = 3;
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured tracing
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run() -> Result<ExitCode, KernelError> {
    let mut config = KernelConfig::from_env()?;
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_input_path(path);
    }
    info!(config = ?config, "Configuration loaded");

    let workload = load_file(&config.input_path)?;
    for rejected in &workload.report.rejected {
        println!("Skipping line {} ({}): {}", rejected.line, rejected.error, rejected.text);
    }
    println!(
        "Configuration: processors: {}\tthreads per processor: {}\ttotal units: {}",
        workload.header.processors,
        workload.header.threads_per_processor,
        workload.budget()
    );

    let reporter: Arc<dyn Reporter> = match config.reporter {
        ReporterKind::Console => Arc::new(ConsoleReporter::stdout()),
        ReporterKind::Tracing => Arc::new(TracingReporter),
    };

    let mut scheduler = Scheduler::builder(workload.budget())
        .with_config(&config)
        .with_reporter(reporter)
        .build()?;

    for descriptor in workload.descriptors {
        scheduler.admit_descriptor(descriptor)?;
    }

    let outcome = match config.tick {
        Some(tick) => {
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Cannot listen for Ctrl+C");
                    std::future::pending::<()>().await;
                }
            };
            match run_paced(&mut scheduler, tick, shutdown).await? {
                PacedRun::Finished(outcome) => outcome,
                PacedRun::Interrupted { clock } => {
                    println!("Interrupted at clock {}", clock);
                    return Ok(ExitCode::from(EXIT_INTERRUPTED));
                }
            }
        }
        None => scheduler.run()?,
    };

    let drained = outcome.is_drained();
    print_summary(&scheduler.summary(outcome), config.json_summary);

    Ok(if drained {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_STALLED)
    })
}

fn print_summary(summary: &RunSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{}", text),
            Err(e) => warn!(error = %e, "Failed to serialize run summary"),
        }
        return;
    }

    let stats = &summary.stats;
    println!("================================================");
    println!(
        "Run {}: clock {}, {} dispatches, {} promotions, peak units in use {}/{}",
        summary.outcome.as_str(),
        stats.clock,
        stats.dispatches,
        stats.promotions,
        stats.peak_units_in_use,
        stats.total_units
    );
    println!("{:>8} {:>8} {:>11} {:>9} {:>10}", "PID", "PPID", "DISPATCHES", "EXECUTED", "FINISHED");
    for p in &summary.processes {
        println!(
            "{:>8} {:>8} {:>11} {:>9} {:>10}",
            p.pid, p.ppid, p.dispatches, p.executed_time, p.completed_at
        );
    }
}
