/*!
 * Process Module
 * Process entity, descriptors, and lifecycle state machine
 */

pub mod entity;
pub mod types;

// Re-export for convenience
pub use entity::Process;
pub use types::{ProcessDescriptor, ProcessError, ProcessResult, ProcessState};
