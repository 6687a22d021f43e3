/*!
 * Paced Runtime
 * Maps simulated ticks onto real delays between scheduling cycles
 *
 * The scheduler itself never sleeps. This driver performs one cycle, then
 * waits `charge x tick` before the next, so only one process's state changes
 * between two dispatch decisions.
 */

use crate::core::errors::SchedulerError;
use crate::core::types::Ticks;
use crate::monitoring::span_run;
use crate::scheduler::{Cycle, RunOutcome, Scheduler};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn, Instrument};

/// How a paced run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacedRun {
    Finished(RunOutcome),
    /// Shutdown requested between two cycles
    Interrupted { clock: Ticks },
}

/// Real delay for a dispatch billed `charge` ticks
#[inline]
pub fn delay_for(tick: Duration, charge: Ticks) -> Duration {
    tick.saturating_mul(u32::try_from(charge).unwrap_or(u32::MAX))
}

/// Drive `scheduler` to completion, sleeping after every dispatch
///
/// Resolving `shutdown` stops the run before the next cycle.
pub async fn run_paced<F>(
    scheduler: &mut Scheduler,
    tick: Duration,
    shutdown: F,
) -> Result<PacedRun, SchedulerError>
where
    F: Future<Output = ()>,
{
    let span = span_run(scheduler.len(), scheduler.total_units());
    info!(
        trace_id = span.trace_id(),
        tick_ms = tick.as_millis() as u64,
        "Paced run started"
    );

    let result = drive(scheduler, tick, shutdown)
        .instrument(span.span().clone())
        .await?;

    if let PacedRun::Finished(outcome) = &result {
        let stats = scheduler.stats();
        span.record_finish(stats.dispatches, stats.clock, outcome.as_str());
        scheduler.report_outcome(outcome);
    }
    Ok(result)
}

async fn drive<F>(
    scheduler: &mut Scheduler,
    tick: Duration,
    shutdown: F,
) -> Result<PacedRun, SchedulerError>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let charge = match scheduler.step()? {
            Cycle::Dispatched(dispatch) => dispatch.charge,
            Cycle::Idle | Cycle::Drained => break,
        };

        tokio::select! {
            _ = tokio::time::sleep(delay_for(tick, charge)) => {}
            _ = &mut shutdown => {
                warn!(clock = scheduler.clock(), "Paced run interrupted");
                return Ok(PacedRun::Interrupted { clock: scheduler.clock() });
            }
        }
    }

    Ok(PacedRun::Finished(scheduler.outcome()))
}
