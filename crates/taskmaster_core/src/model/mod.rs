//! Domain model for tasks and streak state.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Host pure day-granularity rules (streak transition, field validation).
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned by storage.
//! - All dates are calendar days with no time component.

pub mod streak;
pub mod task;
