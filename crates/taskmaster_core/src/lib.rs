//! Core domain logic for the TaskMaster daily task tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod screen_time;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::streak::{StreakState, SKIP_COOLDOWN_DAYS};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::streak_repo::{SqliteStreakRepository, StreakRepository};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use screen_time::{
    classify, parse_hours, read_screen_time, save_screenshot, ScreenTimeError, ScreenTimeReport,
    ScreenTimeResult, ScreenTimeVerdict, TextRecognizer, SCREEN_TIME_LIMIT_HOURS,
};
pub use service::daily::{daily_refresh, dashboard, DashboardSnapshot};
pub use service::streak_service::StreakService;
pub use service::task_service::{ServiceError, ServiceResult, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
