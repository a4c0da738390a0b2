//! Streak state model and transition rule.
//!
//! # Responsibility
//! - Define the singleton streak record persisted in `streaks`.
//! - Keep the day-gap transition rule as a pure function so it can be
//!   tested without storage.
//!
//! # Invariants
//! - `current_streak` only increments by 1, resets to 1, or holds steady.
//! - Exactly one streak row exists once storage has been used.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days that must pass before another emergency skip is granted.
pub const SKIP_COOLDOWN_DAYS: i64 = 7;

/// Singleton record tracking the running completion streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Day the streak counter was last refreshed.
    pub last_updated: NaiveDate,
    /// Consecutive-day counter shown to the user.
    pub current_streak: u32,
    /// Lifetime count of emergency skips ever granted.
    pub emergency_skips: u32,
    /// Day the most recent emergency skip was granted, if any.
    pub last_skip_date: Option<NaiveDate>,
}

impl StreakState {
    /// Initial state for a fresh installation.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            last_updated: today,
            current_streak: 0,
            emergency_skips: 0,
            last_skip_date: None,
        }
    }

    /// Whether an emergency skip may be granted on `today`.
    ///
    /// Granted when no skip was ever used, or the last one is at least
    /// [`SKIP_COOLDOWN_DAYS`] days old.
    pub fn skip_available(&self, today: NaiveDate) -> bool {
        match self.last_skip_date {
            None => true,
            Some(last) => (today - last).num_days() >= SKIP_COOLDOWN_DAYS,
        }
    }
}

/// Applies the streak transition for a refresh on `today`.
///
/// `gap == 1` is a consecutive day and increments; `gap > 1` means missed
/// days and resets to 1; `gap == 0` holds. A negative gap (clock moved
/// backward) is treated the same as a same-day refresh.
pub fn advance_streak(current: u32, last_updated: NaiveDate, today: NaiveDate) -> u32 {
    match (today - last_updated).num_days() {
        1 => current + 1,
        gap if gap > 1 => 1,
        _ => current,
    }
}
