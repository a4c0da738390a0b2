//! Streak use-case service.
//!
//! # Responsibility
//! - Provide stable streak entry points for core callers.
//! - Delegate persistence to the streak repository.

use crate::model::streak::StreakState;
use crate::repo::streak_repo::StreakRepository;
use crate::repo::task_repo::RepoResult;
use chrono::NaiveDate;
use log::info;

/// Use-case service wrapper for streak operations.
pub struct StreakService<R: StreakRepository> {
    repo: R,
}

impl<R: StreakRepository> StreakService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Current streak state, creating the initial record on first use.
    pub fn current(&self, today: NaiveDate) -> RepoResult<StreakState> {
        self.repo.load_or_init(today)
    }

    /// Applies the once-per-invocation streak transition.
    pub fn refresh(&self, today: NaiveDate) -> RepoResult<u32> {
        self.repo.refresh(today)
    }

    /// Attempts to use the weekly emergency skip.
    ///
    /// Granting does not itself protect the streak; the caller decides how
    /// to treat the day.
    pub fn try_emergency_skip(&self, today: NaiveDate) -> RepoResult<bool> {
        let granted = self.repo.try_emergency_skip(today)?;
        info!(
            "event=emergency_skip module=service status={}",
            if granted { "granted" } else { "denied" }
        );
        Ok(granted)
    }
}
