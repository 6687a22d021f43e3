/*!
 * Starvation Avoidance
 * Periodic bulk promotion of Q2 and Q3 into Q1
 */

use super::types::{Location, QueueLevel};
use super::Scheduler;
use crate::monitoring::Event;
use tracing::debug;

impl Scheduler {
    /// Whether at least one promotion interval elapsed since the last one
    #[inline]
    pub fn promotion_due(&self) -> bool {
        self.clock.saturating_sub(self.last_promotion) >= self.promotion_interval
    }

    /// Move all of Q2, then all of Q3, to the tail of Q1
    ///
    /// Relative order inside each source queue is kept. Runs regardless of
    /// what Q1 already holds. Returns the number of processes moved.
    pub fn promote(&mut self) -> usize {
        let mut moved = 0;

        for level in [QueueLevel::Q2, QueueLevel::Q3] {
            let queue = std::mem::take(&mut self.ready[level.index()]);
            for handle in queue {
                self.arena
                    .set_location(handle, Location::Ready(QueueLevel::Q1));
                self.ready[QueueLevel::Q1.index()].push_back(handle);
                moved += 1;
            }
        }

        self.last_promotion = self.clock;
        self.stats.promotions += 1;

        debug!(clock = self.clock, moved, "promoted lower levels to Q1");
        self.emit(Event::Promoted {
            clock: self.clock,
            moved,
        });
        moved
    }
}
