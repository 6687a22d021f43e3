/*!
 * Scheduler Builder
 * Builder pattern for Scheduler construction and setup validation
 */

use super::Scheduler;
use crate::config::KernelConfig;
use crate::core::errors::ConfigError;
use crate::core::limits::{DEFAULT_THROUGHPUT, PROMOTION_INTERVAL};
use crate::core::types::{Ticks, Units};
use crate::monitoring::Reporter;
use std::sync::Arc;
use tracing::info;

/// Builder for Scheduler
pub struct SchedulerBuilder {
    total_units: Units,
    throughput: u32,
    promotion_interval: Ticks,
    reporter: Option<Arc<dyn Reporter>>,
}

impl SchedulerBuilder {
    /// Create a builder for a pool of `total_units`
    pub fn new(total_units: Units) -> Self {
        Self {
            total_units,
            throughput: DEFAULT_THROUGHPUT,
            promotion_interval: PROMOTION_INTERVAL,
            reporter: None,
        }
    }

    /// Divide every quantum by `throughput` when charging the clock
    pub fn with_throughput(mut self, throughput: u32) -> Self {
        self.throughput = throughput;
        self
    }

    /// Override the starvation promotion interval
    pub fn with_promotion_interval(mut self, interval: Ticks) -> Self {
        self.promotion_interval = interval;
        self
    }

    /// Add an event sink
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Apply throughput and promotion interval from runtime configuration
    pub fn with_config(self, config: &KernelConfig) -> Self {
        self.with_throughput(config.throughput)
            .with_promotion_interval(config.promotion_interval)
    }

    /// Build the scheduler
    ///
    /// A zero budget, throughput or promotion interval describes an unusable
    /// environment and is rejected up front.
    pub fn build(self) -> Result<Scheduler, ConfigError> {
        if self.total_units == 0 {
            return Err(ConfigError::InvalidBudget(0));
        }
        if self.throughput == 0 {
            return Err(ConfigError::InvalidThroughput(0));
        }
        if self.promotion_interval == 0 {
            return Err(ConfigError::InvalidPromotionInterval(0));
        }

        info!(
            total_units = self.total_units,
            throughput = self.throughput,
            promotion_interval = self.promotion_interval,
            "Scheduler initialized"
        );

        Ok(Scheduler::from_parts(
            self.total_units,
            self.throughput,
            self.promotion_interval,
            self.reporter,
        ))
    }
}
