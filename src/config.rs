/*!
 * Runtime Configuration
 * Defaults overridden by MLFQ_* environment variables
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{DEFAULT_INPUT_PATH, DEFAULT_THROUGHPUT, PROMOTION_INTERVAL};
use crate::core::types::Ticks;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Which reporter narrates the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReporterKind {
    /// Plain lines on stdout
    Console,
    /// Structured tracing events
    Tracing,
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    pub input_path: PathBuf,
    pub throughput: u32,
    pub promotion_interval: Ticks,
    /// Real delay per simulated tick; `None` runs as fast as possible
    #[serde(with = "tick_millis", default)]
    pub tick: Option<Duration>,
    pub reporter: ReporterKind,
    pub json_summary: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            throughput: DEFAULT_THROUGHPUT,
            promotion_interval: PROMOTION_INTERVAL,
            tick: None,
            reporter: ReporterKind::Console,
            json_summary: false,
        }
    }
}

impl KernelConfig {
    /// Build configuration from the process environment
    ///
    /// Environment variables:
    /// - MLFQ_INPUT: workload file (default: procesos.dat)
    /// - MLFQ_THROUGHPUT: quantum divisor, must be >= 1 (default: 1)
    /// - MLFQ_PROMOTION_INTERVAL: ticks between promotions (default: 60)
    /// - MLFQ_TICK_MS: real milliseconds per simulated tick (default: unset)
    /// - MLFQ_REPORTER: console | tracing (default: console)
    /// - MLFQ_SUMMARY_JSON: print the final summary as JSON (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("MLFQ_INPUT") {
            config.input_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("MLFQ_THROUGHPUT") {
            let value = parse_i64("MLFQ_THROUGHPUT", &raw)?;
            config.throughput = u32::try_from(value)
                .ok()
                .filter(|&v| v > 0)
                .ok_or(ConfigError::InvalidThroughput(value))?;
        }

        if let Some(raw) = lookup("MLFQ_PROMOTION_INTERVAL") {
            let value = parse_i64("MLFQ_PROMOTION_INTERVAL", &raw)?;
            config.promotion_interval = u64::try_from(value)
                .ok()
                .filter(|&v| v > 0)
                .ok_or(ConfigError::InvalidPromotionInterval(value))?;
        }

        if let Some(raw) = lookup("MLFQ_TICK_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("MLFQ_TICK_MS", &raw))?;
            config.tick = (millis > 0).then(|| Duration::from_millis(millis));
        }

        if let Some(raw) = lookup("MLFQ_REPORTER") {
            config.reporter = match raw.trim().to_lowercase().as_str() {
                "console" => ReporterKind::Console,
                "tracing" => ReporterKind::Tracing,
                _ => return Err(invalid("MLFQ_REPORTER", &raw)),
            };
        }

        if let Some(raw) = lookup("MLFQ_SUMMARY_JSON") {
            config.json_summary = raw == "1" || raw == "true";
        }

        Ok(config)
    }

    /// Override the input path (first command-line argument)
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }
}

fn parse_i64(var: &'static str, raw: &str) -> Result<i64, ConfigError> {
    raw.trim().parse::<i64>().map_err(|_| invalid(var, raw))
}

fn invalid(var: &'static str, raw: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        var,
        value: raw.to_string(),
    }
}

mod tick_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(tick: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match tick {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
