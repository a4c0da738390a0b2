use chrono::NaiveDate;
use taskmaster_core::db::open_db_in_memory;
use taskmaster_core::{SqliteStreakRepository, StreakRepository, StreakService};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

#[test]
fn first_use_creates_initial_state_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStreakRepository::try_new(&conn).unwrap();

    let state = repo.load_or_init(day(10)).unwrap();
    assert_eq!(state.current_streak, 0);
    assert_eq!(state.emergency_skips, 0);
    assert_eq!(state.last_updated, day(10));
    assert_eq!(state.last_skip_date, None);

    // A second load must not insert a second row.
    repo.load_or_init(day(11)).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM streaks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn refresh_transition_table() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStreakRepository::try_new(&conn).unwrap();

    repo.load_or_init(day(10)).unwrap();

    // Same day: streak holds.
    assert_eq!(repo.refresh(day(10)).unwrap(), 0);
    // Consecutive days increment.
    assert_eq!(repo.refresh(day(11)).unwrap(), 1);
    assert_eq!(repo.refresh(day(12)).unwrap(), 2);
    // Same-day second refresh still holds.
    assert_eq!(repo.refresh(day(12)).unwrap(), 2);
    // A three-day gap resets to 1.
    assert_eq!(repo.refresh(day(15)).unwrap(), 1);
}

#[test]
fn refresh_always_moves_last_updated_to_today() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStreakRepository::try_new(&conn).unwrap();

    repo.load_or_init(day(10)).unwrap();
    repo.refresh(day(11)).unwrap();

    let state = repo.load_or_init(day(11)).unwrap();
    assert_eq!(state.last_updated, day(11));
}

#[test]
fn backward_clock_holds_streak() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStreakRepository::try_new(&conn).unwrap();

    repo.load_or_init(day(10)).unwrap();
    repo.refresh(day(11)).unwrap();

    assert_eq!(repo.refresh(day(9)).unwrap(), 1);
}

#[test]
fn emergency_skip_grant_deny_and_regrant_after_cooldown() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStreakRepository::try_new(&conn).unwrap();

    // Fresh state: granted.
    assert!(repo.try_emergency_skip(day(1)).unwrap());
    // Same day again: denied.
    assert!(!repo.try_emergency_skip(day(1)).unwrap());
    // Six days later: still inside the cooldown.
    assert!(!repo.try_emergency_skip(day(7)).unwrap());
    // Seven days later: granted again.
    assert!(repo.try_emergency_skip(day(8)).unwrap());

    let state = repo.load_or_init(day(8)).unwrap();
    assert_eq!(state.emergency_skips, 2);
    assert_eq!(state.last_skip_date, Some(day(8)));
}

#[test]
fn denied_skip_leaves_state_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStreakRepository::try_new(&conn).unwrap();

    assert!(repo.try_emergency_skip(day(1)).unwrap());
    let before = repo.load_or_init(day(3)).unwrap();

    assert!(!repo.try_emergency_skip(day(3)).unwrap());
    let after = repo.load_or_init(day(3)).unwrap();
    assert_eq!(after, before);
}

#[test]
fn skip_does_not_touch_current_streak() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStreakRepository::try_new(&conn).unwrap();

    repo.load_or_init(day(10)).unwrap();
    repo.refresh(day(11)).unwrap();
    repo.refresh(day(12)).unwrap();

    assert!(repo.try_emergency_skip(day(12)).unwrap());
    let state = repo.load_or_init(day(12)).unwrap();
    assert_eq!(state.current_streak, 2);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = StreakService::new(SqliteStreakRepository::try_new(&conn).unwrap());

    assert_eq!(service.current(day(10)).unwrap().current_streak, 0);
    assert_eq!(service.refresh(day(11)).unwrap(), 1);
    assert!(service.try_emergency_skip(day(11)).unwrap());
}
