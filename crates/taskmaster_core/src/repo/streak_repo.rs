//! Streak repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own persistence of the singleton `streaks` row.
//! - Apply the streak transition and skip cooldown against storage.
//!
//! # Invariants
//! - At most one streak row is ever created; the newest row is
//!   authoritative.
//! - `refresh` sets `last_updated = today` unconditionally.
//! - A denied emergency skip leaves state untouched.

use crate::model::streak::{advance_streak, StreakState};
use crate::repo::task_repo::{date_to_db, ensure_schema, parse_db_date, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const STREAK_SELECT_SQL: &str = "SELECT
    id,
    last_updated,
    current_streak,
    emergency_skips,
    last_skip_date
FROM streaks
ORDER BY id DESC
LIMIT 1";

/// Repository interface for the singleton streak record.
pub trait StreakRepository {
    /// Returns the streak state, creating the initial row on first use.
    fn load_or_init(&self, today: NaiveDate) -> RepoResult<StreakState>;
    /// Applies the day-gap transition once and returns the new streak.
    fn refresh(&self, today: NaiveDate) -> RepoResult<u32>;
    /// Grants an emergency skip when the weekly cooldown allows it.
    ///
    /// Returns `true` when granted. Has no effect on `current_streak`;
    /// whether the caller treats the day as non-breaking is its own call.
    fn try_emergency_skip(&self, today: NaiveDate) -> RepoResult<bool>;
}

/// SQLite-backed streak repository.
pub struct SqliteStreakRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStreakRepository<'conn> {
    /// Wraps a bootstrapped connection, rejecting unbootstrapped ones.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(
            conn,
            "streaks",
            &[
                "id",
                "last_updated",
                "current_streak",
                "emergency_skips",
                "last_skip_date",
            ],
        )?;
        Ok(Self { conn })
    }

    fn load_row(&self) -> RepoResult<Option<(i64, StreakState)>> {
        let row = self
            .conn
            .query_row(STREAK_SELECT_SQL, [], |row| {
                Ok((row.get::<_, i64>("id")?, raw_streak_row(row)?))
            })
            .optional()?;

        match row {
            Some((id, raw)) => Ok(Some((id, parse_streak_row(raw)?))),
            None => Ok(None),
        }
    }

    fn load_or_init_row(&self, today: NaiveDate) -> RepoResult<(i64, StreakState)> {
        if let Some(found) = self.load_row()? {
            return Ok(found);
        }

        let initial = StreakState::initial(today);
        self.conn.execute(
            "INSERT INTO streaks (last_updated, current_streak, emergency_skips, last_skip_date)
             VALUES (?1, ?2, ?3, NULL);",
            params![
                date_to_db(initial.last_updated),
                initial.current_streak,
                initial.emergency_skips
            ],
        )?;
        Ok((self.conn.last_insert_rowid(), initial))
    }
}

impl StreakRepository for SqliteStreakRepository<'_> {
    fn load_or_init(&self, today: NaiveDate) -> RepoResult<StreakState> {
        let (_, state) = self.load_or_init_row(today)?;
        Ok(state)
    }

    fn refresh(&self, today: NaiveDate) -> RepoResult<u32> {
        let (row_id, state) = self.load_or_init_row(today)?;
        let next = advance_streak(state.current_streak, state.last_updated, today);

        self.conn.execute(
            "UPDATE streaks SET last_updated = ?1, current_streak = ?2 WHERE id = ?3;",
            params![date_to_db(today), next, row_id],
        )?;
        Ok(next)
    }

    fn try_emergency_skip(&self, today: NaiveDate) -> RepoResult<bool> {
        let (row_id, state) = self.load_or_init_row(today)?;
        if !state.skip_available(today) {
            return Ok(false);
        }

        self.conn.execute(
            "UPDATE streaks SET emergency_skips = ?1, last_skip_date = ?2 WHERE id = ?3;",
            params![state.emergency_skips + 1, date_to_db(today), row_id],
        )?;
        Ok(true)
    }
}

/// Column values read before date parsing, which needs a `RepoResult`
/// context unavailable inside the rusqlite row closure.
struct RawStreakRow {
    last_updated: String,
    current_streak: u32,
    emergency_skips: u32,
    last_skip_date: Option<String>,
}

fn raw_streak_row(row: &Row<'_>) -> rusqlite::Result<RawStreakRow> {
    Ok(RawStreakRow {
        last_updated: row.get("last_updated")?,
        current_streak: row.get("current_streak")?,
        emergency_skips: row.get("emergency_skips")?,
        last_skip_date: row.get("last_skip_date")?,
    })
}

fn parse_streak_row(raw: RawStreakRow) -> RepoResult<StreakState> {
    let last_updated = parse_db_date(&raw.last_updated, "streaks.last_updated")?;
    let last_skip_date = match raw.last_skip_date {
        Some(value) => Some(parse_db_date(&value, "streaks.last_skip_date")?),
        None => None,
    };

    Ok(StreakState {
        last_updated,
        current_streak: raw.current_streak,
        emergency_skips: raw.emergency_skips,
        last_skip_date,
    })
}
