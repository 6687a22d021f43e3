/*!
 * Simulator Limits and Constants
 *
 * Centralized location for scheduling constants and input format limits.
 */

use super::types::Ticks;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Ticks that must elapse between two starvation-avoidance promotions
pub const PROMOTION_INTERVAL: Ticks = 60;

/// Default throughput factor (quantum is charged in full)
pub const DEFAULT_THROUGHPUT: u32 = 1;

/// Smallest charge billed for a single dispatch
///
/// Integer division by the throughput factor may round a small quantum down
/// to zero; a dispatch always consumes at least one tick.
pub const MIN_CHARGE: Ticks = 1;

/// Number of ready levels in the feedback hierarchy
pub const READY_LEVELS: usize = 3;

// =============================================================================
// INPUT FORMAT
// =============================================================================

/// Fields in one process descriptor line
pub const DESCRIPTOR_FIELDS: usize = 8;

/// Field separator inside a descriptor line
pub const DESCRIPTOR_SEPARATOR: char = '|';

/// Header lines preceding the descriptors (processors, threads per processor)
pub const HEADER_LINES: usize = 2;

/// Default input file consumed by the binary
pub const DEFAULT_INPUT_PATH: &str = "procesos.dat";
