/*!
 * Multilevel Feedback Queue Scheduler
 * Three ready levels, a resource-gated waiting queue and periodic promotion
 */

use crate::core::limits::READY_LEVELS;
use crate::core::types::{Pid, Ticks, Units};
use crate::monitoring::{Event, NullReporter, Reporter};
use crate::process::Process;
use std::collections::VecDeque;
use std::sync::Arc;

mod admission;
mod arena;
mod builder;
mod dispatch;
mod promotion;
mod run;
mod stats;
pub mod types;

use arena::{Handle, ProcessArena};

pub use builder::SchedulerBuilder;
pub use stats::RunSummary;
pub use types::{
    Admission, Cycle, Dispatch, Location, ProcessSummary, QueueLevel, RunOutcome, SchedulerStats,
};

/// Multilevel feedback queue scheduler
///
/// Owns every admitted process. All mutation of the resource pool and the
/// clock funnels through admission, release and dispatch; the scheduler runs
/// on a single control path and is driven through `&mut self`.
pub struct Scheduler {
    arena: ProcessArena,
    ready: [VecDeque<Handle>; READY_LEVELS],
    waiting: VecDeque<Handle>,

    total_units: Units,
    available_units: Units,

    clock: Ticks,
    last_promotion: Ticks,
    promotion_interval: Ticks,
    throughput: u32,

    stats: SchedulerStats,
    completed: Vec<ProcessSummary>,

    reporter: Arc<dyn Reporter>,
}

impl Scheduler {
    /// Create a scheduler builder for a pool of `total_units`
    pub fn builder(total_units: Units) -> SchedulerBuilder {
        SchedulerBuilder::new(total_units)
    }

    fn from_parts(
        total_units: Units,
        throughput: u32,
        promotion_interval: Ticks,
        reporter: Option<Arc<dyn Reporter>>,
    ) -> Self {
        Self {
            arena: ProcessArena::new(),
            ready: Default::default(),
            waiting: VecDeque::new(),
            total_units,
            available_units: total_units,
            clock: 0,
            last_promotion: 0,
            promotion_interval,
            throughput,
            stats: SchedulerStats::default(),
            completed: Vec::new(),
            reporter: reporter.unwrap_or_else(|| Arc::new(NullReporter)),
        }
    }

    /// Replace the event sink
    pub fn set_reporter(&mut self, reporter: Arc<dyn Reporter>) {
        self.reporter = reporter;
    }

    #[inline]
    fn emit(&self, event: Event) {
        self.reporter.report(&event);
    }

    #[inline]
    pub fn clock(&self) -> Ticks {
        self.clock
    }

    #[inline]
    pub fn last_promotion(&self) -> Ticks {
        self.last_promotion
    }

    pub fn promotion_interval(&self) -> Ticks {
        self.promotion_interval
    }

    pub fn throughput(&self) -> u32 {
        self.throughput
    }

    #[inline]
    pub fn total_units(&self) -> Units {
        self.total_units
    }

    #[inline]
    pub fn available_units(&self) -> Units {
        self.available_units
    }

    /// Pids queued at `level`, head first
    pub fn queue(&self, level: QueueLevel) -> Vec<Pid> {
        self.pids_of(&self.ready[level.index()])
    }

    /// Pids in the waiting queue, head first
    pub fn waiting(&self) -> Vec<Pid> {
        self.pids_of(&self.waiting)
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.arena
            .handle_of(pid)
            .and_then(|handle| self.arena.get(handle))
    }

    pub fn location_of(&self, pid: Pid) -> Option<Location> {
        self.arena
            .handle_of(pid)
            .and_then(|handle| self.arena.location(handle))
    }

    /// Number of live (not yet terminated) processes
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// All ready queues are empty
    pub fn ready_is_empty(&self) -> bool {
        self.ready.iter().all(VecDeque::is_empty)
    }

    /// Every queue, including waiting, is empty
    pub fn is_drained(&self) -> bool {
        self.ready_is_empty() && self.waiting.is_empty()
    }

    fn pids_of(&self, queue: &VecDeque<Handle>) -> Vec<Pid> {
        queue
            .iter()
            .filter_map(|&handle| self.arena.get(handle).map(Process::pid))
            .collect()
    }
}
