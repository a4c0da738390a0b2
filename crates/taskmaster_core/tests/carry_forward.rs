use chrono::NaiveDate;
use taskmaster_core::db::open_db_in_memory;
use taskmaster_core::{SqliteTaskRepository, TaskRepository, TaskService};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

#[test]
fn overdue_task_is_cloned_into_today_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let original = repo
        .create_task("Morning Workout", "30 minutes", day(9), false)
        .unwrap();

    let created = service.carry_forward_overdue(day(10)).unwrap();
    assert_eq!(created, 1);

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 2);

    let clone = all
        .iter()
        .find(|task| task.id != original)
        .expect("clone should exist");
    assert_eq!(clone.name, "Morning Workout");
    assert_eq!(clone.intensity, "30 minutes");
    assert_eq!(clone.date, day(10));
    assert!(clone.carry_forward);
    assert!(!clone.completed);
}

#[test]
fn rerun_on_same_day_does_not_clone_again() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    repo.create_task("Read", "20 minutes", day(9), false).unwrap();

    assert_eq!(service.carry_forward_overdue(day(10)).unwrap(), 1);
    // The original still sits in the overdue view with
    // carry_forward = false; the same-day guard must keep the pass
    // idempotent anyway.
    assert_eq!(service.carry_forward_overdue(day(10)).unwrap(), 0);
    assert_eq!(repo.list_all().unwrap().len(), 2);
}

#[test]
fn original_overdue_row_is_left_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let original = repo.create_task("Gym", "1 hour", day(8), false).unwrap();
    service.carry_forward_overdue(day(10)).unwrap();

    let pending = repo.tasks_overdue(day(10)).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, original);
    assert_eq!(pending[0].date, day(8));
    assert!(!pending[0].carry_forward);
    assert!(!pending[0].completed);
}

#[test]
fn carried_clone_is_never_recloned() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    // A clone left incomplete from yesterday is itself overdue now, but
    // its carry_forward flag exempts it from the pass.
    repo.create_task("Stretch", "10 minutes", day(9), true).unwrap();

    assert_eq!(service.carry_forward_overdue(day(10)).unwrap(), 0);
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn neglected_original_is_recloned_on_the_next_day() {
    // Inherited behavior: because the original is never marked, each new
    // day re-clones it while its first clone ages into the overdue view.
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    repo.create_task("Journal", "5 minutes", day(9), false).unwrap();

    assert_eq!(service.carry_forward_overdue(day(10)).unwrap(), 1);
    assert_eq!(service.carry_forward_overdue(day(11)).unwrap(), 1);

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 3);
    let today_clones: Vec<_> = all
        .iter()
        .filter(|task| task.date == day(11) && task.carry_forward)
        .collect();
    assert_eq!(today_clones.len(), 1);
}

#[test]
fn completed_overdue_tasks_are_not_carried() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let id = repo.create_task("Done", "5 minutes", day(9), false).unwrap();
    repo.set_completed(id, true).unwrap();

    assert_eq!(service.carry_forward_overdue(day(10)).unwrap(), 0);
    assert_eq!(repo.list_all().unwrap().len(), 1);
}
