//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable task entry points for core callers.
//! - Enforce input validation the store deliberately does not.
//! - Own the overdue carry-forward pass.
//!
//! # Invariants
//! - No partial record is created from blank input.
//! - Carry-forward never mutates or deletes the original overdue row.

use crate::model::task::{validate_task_fields, Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error: either rejected input or a storage failure.
#[derive(Debug)]
pub enum ServiceError {
    Validation(TaskValidationError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for ServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a user-entered task dated `today`.
    ///
    /// # Contract
    /// - Rejects blank name or intensity before any row is written.
    /// - The created task has `completed = false`, `carry_forward = false`.
    pub fn create_task(
        &self,
        name: &str,
        intensity: &str,
        today: NaiveDate,
    ) -> ServiceResult<TaskId> {
        validate_task_fields(name, intensity)?;
        let id = self.repo.create_task(name, intensity, today, false)?;
        info!("event=task_created module=service status=ok task_id={id}");
        Ok(id)
    }

    /// Rewrites name/intensity of an existing task.
    ///
    /// Returns `Ok(false)` when the id is unknown; a missing row is a
    /// zero-row effect, not an error.
    pub fn update_task(&self, id: TaskId, name: &str, intensity: &str) -> ServiceResult<bool> {
        validate_task_fields(name, intensity)?;
        Ok(self.repo.update_task(id, name, intensity)?)
    }

    /// Deletes a task. Idempotent; returns `Ok(false)` for an unknown id.
    pub fn delete_task(&self, id: TaskId) -> ServiceResult<bool> {
        Ok(self.repo.delete_task(id)?)
    }

    /// Marks a task done. Also clears its carried-over status.
    pub fn complete_task(&self, id: TaskId) -> ServiceResult<bool> {
        Ok(self.repo.set_completed(id, true)?)
    }

    /// Undoes completion. Carried-over status is not restored.
    pub fn uncomplete_task(&self, id: TaskId) -> ServiceResult<bool> {
        Ok(self.repo.set_completed(id, false)?)
    }

    /// Every task, newest date first.
    pub fn list_all(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.list_all()?)
    }

    /// Tasks scheduled on `date`.
    pub fn tasks_on(&self, date: NaiveDate) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.tasks_on(date)?)
    }

    /// Completed tasks scheduled on `date`.
    pub fn tasks_completed_on(&self, date: NaiveDate) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.tasks_completed_on(date)?)
    }

    /// Incomplete tasks dated strictly before `before`.
    pub fn tasks_overdue(&self, before: NaiveDate) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.tasks_overdue(before)?)
    }

    /// Completion percentage over the trailing seven days.
    pub fn weekly_completion_rate(&self, now: NaiveDate) -> ServiceResult<f64> {
        Ok(self.repo.weekly_completion_rate(now)?)
    }

    /// Clones overdue incomplete tasks into `today` so they reappear as
    /// active. Returns how many clones were created.
    ///
    /// # Contract
    /// - Only rows with `carry_forward = false` are considered; clones of
    ///   clones never happen.
    /// - Re-running on the same day is idempotent: a clone is skipped when
    ///   an identical carried task dated `today` already exists.
    /// - The original row is left untouched, so it stays in the overdue
    ///   view and is reconsidered on later days. Whether that re-cloning
    ///   across days is intended is an open product question; see
    ///   DESIGN.md.
    pub fn carry_forward_overdue(&self, today: NaiveDate) -> ServiceResult<u32> {
        let mut created = 0;
        for task in self.repo.tasks_overdue(today)? {
            if task.carry_forward {
                continue;
            }
            if self
                .repo
                .has_carried_clone(&task.name, &task.intensity, today)?
            {
                continue;
            }
            self.repo
                .create_task(&task.name, &task.intensity, today, true)?;
            created += 1;
        }

        if created > 0 {
            info!("event=carry_forward module=service status=ok created={created}");
        }
        Ok(created)
    }
}
