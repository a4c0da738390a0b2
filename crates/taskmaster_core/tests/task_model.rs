use chrono::NaiveDate;
use taskmaster_core::model::task::validate_task_fields;
use taskmaster_core::{StreakState, Task, TaskValidationError};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

#[test]
fn validate_task_fields_trims_before_checking() {
    assert!(validate_task_fields("Workout", "30 minutes").is_ok());
    assert_eq!(
        validate_task_fields("   ", "30 minutes"),
        Err(TaskValidationError::EmptyName)
    );
    assert_eq!(
        validate_task_fields("Workout", "\t"),
        Err(TaskValidationError::EmptyIntensity)
    );
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task {
        id: 7,
        name: "Morning Workout".to_string(),
        intensity: "30 minutes".to_string(),
        date: day(10),
        completed: false,
        carry_forward: true,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Morning Workout");
    assert_eq!(json["intensity"], "30 minutes");
    assert_eq!(json["date"], "2026-08-10");
    assert_eq!(json["completed"], false);
    assert_eq!(json["carry_forward"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn streak_state_serialization_roundtrips() {
    let state = StreakState {
        last_updated: day(10),
        current_streak: 4,
        emergency_skips: 1,
        last_skip_date: Some(day(6)),
    };

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["last_updated"], "2026-08-10");
    assert_eq!(json["current_streak"], 4);
    assert_eq!(json["last_skip_date"], "2026-08-06");

    let decoded: StreakState = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, state);
}

#[test]
fn initial_state_has_zeroed_counters() {
    let state = StreakState::initial(day(1));
    assert_eq!(state.current_streak, 0);
    assert_eq!(state.emergency_skips, 0);
    assert_eq!(state.last_skip_date, None);
}
