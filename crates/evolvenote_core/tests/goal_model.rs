use chrono::NaiveDate;
use evolvenote_core::{Goal, GoalTask, GoalValidationError, GoalWindow};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn window_rejects_reversed_range() {
    let err = GoalWindow::new(day(2026, 5, 2), day(2026, 5, 1)).unwrap_err();
    assert_eq!(
        err,
        GoalValidationError::InvalidWindow {
            start: day(2026, 5, 2),
            finish: day(2026, 5, 1),
        }
    );
}

#[test]
fn goal_serialization_uses_expected_wire_fields() {
    let task = GoalTask::new("Write 5 sentences").unwrap();
    let window = GoalWindow::new(day(2026, 2, 26), day(2026, 5, 27)).unwrap();
    let goal = Goal::new("Learn Spanish", vec![task.clone()], Some(window), 42).unwrap();

    let json = serde_json::to_value(&goal).unwrap();
    assert_eq!(json["uuid"], goal.uuid.to_string());
    assert_eq!(json["title"], "Learn Spanish");
    assert_eq!(json["tasks"][0]["id"], task.id.to_string());
    assert_eq!(json["window"]["start"], "2026-02-26");
    assert_eq!(json["window"]["finish"], "2026-05-27");
    assert_eq!(json["created_at"], 42);

    let decoded: Goal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, goal);
}

#[test]
fn deserialize_rejects_reversed_window() {
    let value = serde_json::json!({ "start": "2026-05-02", "finish": "2026-05-01" });
    let err = serde_json::from_value::<GoalWindow>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("finish (2026-05-01) must be >= start (2026-05-02)"),
        "unexpected error: {err}"
    );
}

#[test]
fn span_covers_earliest_start_and_latest_finish() {
    let early = GoalWindow::new(day(2026, 2, 26), day(2026, 3, 1)).unwrap();
    let late = GoalWindow::new(day(2026, 2, 27), day(2026, 5, 27)).unwrap();

    let span = early.span(late);

    assert_eq!(span, GoalWindow::new(day(2026, 2, 26), day(2026, 5, 27)).unwrap());
    assert_eq!(late.span(early), span);
}
