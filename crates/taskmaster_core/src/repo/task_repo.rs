//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `tasks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - The store accepts any field content; emptiness rules live in the
//!   service layer.
//! - Mutations touching `completed` and `carry_forward` together happen in
//!   a single UPDATE statement, so a crash cannot separate them.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::{migrations::latest_version, DbError};
use crate::model::task::{Task, TaskId};
use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    name,
    intensity,
    date,
    completed,
    carry_forward
FROM tasks";

const WEEK_WINDOW_DAYS: u64 = 7;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it via db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` does not exist")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD and derived views.
///
/// Every call maps to one statement and is independently atomic against
/// the store.
pub trait TaskRepository {
    /// Inserts a new task with `completed = false` and returns its id.
    fn create_task(
        &self,
        name: &str,
        intensity: &str,
        date: NaiveDate,
        carried: bool,
    ) -> RepoResult<TaskId>;
    /// Lists every task, newest date first, insertion order within a day.
    fn list_all(&self) -> RepoResult<Vec<Task>>;
    /// Rewrites name/intensity. Returns `false` when the id matched no row.
    fn update_task(&self, id: TaskId, name: &str, intensity: &str) -> RepoResult<bool>;
    /// Deletes a task. Idempotent; returns `false` for an unknown id.
    fn delete_task(&self, id: TaskId) -> RepoResult<bool>;
    /// Toggles completion. Completing also clears `carry_forward`;
    /// un-completing never restores it.
    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<bool>;
    /// Tasks scheduled on exactly `date`.
    fn tasks_on(&self, date: NaiveDate) -> RepoResult<Vec<Task>>;
    /// Completed tasks scheduled on exactly `date`.
    fn tasks_completed_on(&self, date: NaiveDate) -> RepoResult<Vec<Task>>;
    /// Incomplete tasks dated strictly before `before`.
    fn tasks_overdue(&self, before: NaiveDate) -> RepoResult<Vec<Task>>;
    /// Completion percentage over the trailing seven-day window, one
    /// decimal place, `0.0` for an empty window.
    fn weekly_completion_rate(&self, now: NaiveDate) -> RepoResult<f64>;
    /// Whether a carried clone with this name/intensity already exists on
    /// `date`. Supports the carry-forward same-day idempotence guard.
    fn has_carried_clone(&self, name: &str, intensity: &str, date: NaiveDate) -> RepoResult<bool>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a bootstrapped connection, rejecting unbootstrapped ones.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(
            conn,
            "tasks",
            &["id", "name", "intensity", "date", "completed", "carry_forward"],
        )?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(
        &self,
        name: &str,
        intensity: &str,
        date: NaiveDate,
        carried: bool,
    ) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (name, intensity, date, completed, carry_forward)
             VALUES (?1, ?2, ?3, 0, ?4);",
            params![name, intensity, date_to_db(date), bool_to_int(carried)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_all(&self) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} ORDER BY date DESC, id ASC;"),
            params![],
        )
    }

    fn update_task(&self, id: TaskId, name: &str, intensity: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks SET name = ?1, intensity = ?2 WHERE id = ?3;",
            params![name, intensity, id],
        )?;
        Ok(changed > 0)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<bool> {
        // Completion clears carry_forward in the same statement: a
        // completed task is no longer a carried-over obligation.
        let changed = if completed {
            self.conn.execute(
                "UPDATE tasks SET completed = 1, carry_forward = 0 WHERE id = ?1;",
                params![id],
            )?
        } else {
            self.conn.execute(
                "UPDATE tasks SET completed = 0 WHERE id = ?1;",
                params![id],
            )?
        };
        Ok(changed > 0)
    }

    fn tasks_on(&self, date: NaiveDate) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE date = ?1 ORDER BY id ASC;"),
            params![date_to_db(date)],
        )
    }

    fn tasks_completed_on(&self, date: NaiveDate) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE completed = 1 AND date = ?1 ORDER BY id ASC;"),
            params![date_to_db(date)],
        )
    }

    fn tasks_overdue(&self, before: NaiveDate) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!(
                "{TASK_SELECT_SQL} WHERE completed = 0 AND date < ?1 ORDER BY date ASC, id ASC;"
            ),
            params![date_to_db(before)],
        )
    }

    fn weekly_completion_rate(&self, now: NaiveDate) -> RepoResult<f64> {
        let window_start = now
            .checked_sub_days(Days::new(WEEK_WINDOW_DAYS))
            .ok_or_else(|| RepoError::InvalidData(format!("date {now} underflows week window")))?;

        let (total, completed): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM tasks WHERE date >= ?1;",
            params![date_to_db(window_start)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        if total == 0 {
            return Ok(0.0);
        }
        let percentage = 100.0 * completed as f64 / total as f64;
        Ok((percentage * 10.0).round() / 10.0)
    }

    fn has_carried_clone(&self, name: &str, intensity: &str, date: NaiveDate) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM tasks
                WHERE name = ?1 AND intensity = ?2 AND date = ?3 AND carry_forward = 1
            );",
            params![name, intensity, date_to_db(date)],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl SqliteTaskRepository<'_> {
    fn query_tasks(&self, sql: &str, bind: impl rusqlite::Params) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let date_text: String = row.get("date")?;
    let date = parse_db_date(&date_text, "tasks.date")?;

    Ok(Task {
        id: row.get("id")?,
        name: row.get("name")?,
        intensity: row.get("intensity")?,
        date,
        completed: int_to_bool(row.get("completed")?, "tasks.completed")?,
        carry_forward: int_to_bool(row.get("carry_forward")?, "tasks.carry_forward")?,
    })
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_db_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{value}` in {column}")))
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

/// Verifies the connection carries the bootstrapped schema this repository
/// expects. Guards against raw `Connection::open` misuse.
pub(crate) fn ensure_schema(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if table_exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>("name")?);
    }
    for column in columns {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}
