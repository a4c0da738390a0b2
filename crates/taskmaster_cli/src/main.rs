//! CLI probe entry point.
//!
//! # Responsibility
//! - Open `tasks.db` in the working directory, run the once-per-invocation
//!   pass, and print the derived metrics surface.
//! - Keep output deterministic for quick local sanity checks.

use chrono::Local;
use std::error::Error;
use std::process::ExitCode;
use taskmaster_core::db::open_db;
use taskmaster_core::{
    daily_refresh, default_log_level, init_logging, SqliteStreakRepository, SqliteTaskRepository,
    StreakService, TaskService,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskmaster: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::current_dir()?.join("logs");
    if let Some(log_dir) = log_dir.to_str() {
        // Logging is best-effort for the probe; a read-only directory
        // should not block the dashboard.
        let _ = init_logging(default_log_level(), log_dir);
    }

    let conn = open_db("tasks.db")?;
    let tasks = TaskService::new(SqliteTaskRepository::try_new(&conn)?);
    let streaks = StreakService::new(SqliteStreakRepository::try_new(&conn)?);

    let today = Local::now().date_naive();
    let snapshot = daily_refresh(&tasks, &streaks, today)?;

    println!("taskmaster_core version={}", taskmaster_core::core_version());
    println!("date={today}");
    println!("current_streak={} days", snapshot.current_streak);
    println!("weekly_completion={}%", snapshot.weekly_completion_pct);
    println!(
        "todays_tasks={} completed_today={}",
        snapshot.todays_task_count, snapshot.completed_today_count
    );

    Ok(())
}
