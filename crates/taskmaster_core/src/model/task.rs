//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by all views.
//! - Provide field validation used by the service layer before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `date` is day-granular; no time component is ever stored.
//! - A task created by carry-forward has `carry_forward = true` and
//!   `completed = false`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable storage-assigned identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable row ID assigned by storage on insert.
    pub id: TaskId,
    /// Short human-readable task title.
    pub name: String,
    /// Free-form duration/effort label (e.g. "30 minutes").
    pub intensity: String,
    /// Calendar day the task belongs to.
    pub date: NaiveDate,
    /// Whether the task has been marked done.
    pub completed: bool,
    /// Set on tasks created by the overdue carry-forward pass.
    pub carry_forward: bool,
}

/// Validation failure for user-supplied task fields.
///
/// The store accepts any strings; this check belongs to the service layer
/// so no partial record is ever created from blank input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyName,
    EmptyIntensity,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
            Self::EmptyIntensity => write!(f, "task intensity must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Checks that both user-supplied fields are non-blank after trimming.
pub fn validate_task_fields(name: &str, intensity: &str) -> Result<(), TaskValidationError> {
    if name.trim().is_empty() {
        return Err(TaskValidationError::EmptyName);
    }
    if intensity.trim().is_empty() {
        return Err(TaskValidationError::EmptyIntensity);
    }
    Ok(())
}
