/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Parent process ID (informational, may be any integer)
pub type ParentPid = i64;

/// Count of shared resource units ("threads")
pub type Units = u32;

/// Simulated time, in ticks
pub type Ticks = u64;

/// Common result type for simulator operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;
