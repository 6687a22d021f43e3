/*!
 * Workload Header
 * Processor and threads-per-processor declarations
 */

use crate::core::errors::ConfigError;
use crate::core::types::Units;
use serde::{Deserialize, Serialize};

/// Resource budget declaration
///
/// Budget = processors x threads per processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub processors: u32,
    pub threads_per_processor: u32,
}

impl Header {
    /// Parse the two `<label> <count>` header lines
    pub fn parse(processors_line: &str, threads_line: &str) -> Result<Self, ConfigError> {
        let processors = parse_count(1, processors_line)?;
        let threads_per_processor = parse_count(2, threads_line)?;

        if processors.checked_mul(threads_per_processor).is_none() {
            return Err(ConfigError::MalformedHeader {
                line: 2,
                reason: format!(
                    "budget {} x {} does not fit in {} bits",
                    processors,
                    threads_per_processor,
                    Units::BITS
                ),
            });
        }

        Ok(Self {
            processors,
            threads_per_processor,
        })
    }

    #[inline]
    pub fn budget(&self) -> Units {
        self.processors * self.threads_per_processor
    }
}

fn parse_count(line: usize, text: &str) -> Result<u32, ConfigError> {
    let mut tokens = text.split_whitespace();
    let (Some(_label), Some(raw)) = (tokens.next(), tokens.next()) else {
        return Err(ConfigError::MalformedHeader {
            line,
            reason: format!("expected '<label> <count>', got {:?}", text),
        });
    };

    let value: i64 = raw.parse().map_err(|_| ConfigError::MalformedHeader {
        line,
        reason: format!("count {:?} is not an integer", raw),
    })?;
    if value <= 0 {
        return Err(ConfigError::InvalidBudget(value));
    }

    u32::try_from(value).map_err(|_| ConfigError::MalformedHeader {
        line,
        reason: format!("count {} is too large", value),
    })
}
