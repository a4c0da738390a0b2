//! Once-per-invocation control flow and derived metrics surface.
//!
//! # Responsibility
//! - Run the fixed startup order: carry-forward, then streak refresh,
//!   then view reads.
//! - Assemble the read-only dashboard metrics.
//!
//! # Invariants
//! - "Daily" semantics are recomputed fresh from the explicit `today`
//!   argument; nothing here reads an ambient clock.

use crate::repo::streak_repo::StreakRepository;
use crate::repo::task_repo::TaskRepository;
use crate::service::streak_service::StreakService;
use crate::service::task_service::{ServiceResult, TaskService};
use chrono::NaiveDate;

/// Read-only metrics recomputed per call.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Consecutive-day completion streak.
    pub current_streak: u32,
    /// Completion percentage over the trailing seven days, one decimal.
    pub weekly_completion_pct: f64,
    /// Number of tasks scheduled today.
    pub todays_task_count: usize,
    /// Number of today's tasks already completed.
    pub completed_today_count: usize,
}

/// Runs one full invocation pass and returns the refreshed dashboard.
///
/// Order is fixed: overdue carry-forward first, then the streak
/// transition, then metric reads.
pub fn daily_refresh<T, S>(
    tasks: &TaskService<T>,
    streaks: &StreakService<S>,
    today: NaiveDate,
) -> ServiceResult<DashboardSnapshot>
where
    T: TaskRepository,
    S: StreakRepository,
{
    tasks.carry_forward_overdue(today)?;
    let current_streak = streaks.refresh(today)?;
    snapshot(tasks, current_streak, today)
}

/// Assembles the dashboard without mutating any state.
pub fn dashboard<T, S>(
    tasks: &TaskService<T>,
    streaks: &StreakService<S>,
    today: NaiveDate,
) -> ServiceResult<DashboardSnapshot>
where
    T: TaskRepository,
    S: StreakRepository,
{
    let current_streak = streaks.current(today)?.current_streak;
    snapshot(tasks, current_streak, today)
}

fn snapshot<T: TaskRepository>(
    tasks: &TaskService<T>,
    current_streak: u32,
    today: NaiveDate,
) -> ServiceResult<DashboardSnapshot> {
    Ok(DashboardSnapshot {
        current_streak,
        weekly_completion_pct: tasks.weekly_completion_rate(today)?,
        todays_task_count: tasks.tasks_on(today)?.len(),
        completed_today_count: tasks.tasks_completed_on(today)?.len(),
    })
}
