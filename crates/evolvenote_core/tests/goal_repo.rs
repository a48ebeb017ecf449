use chrono::NaiveDate;
use evolvenote_core::db::open_db_in_memory;
use evolvenote_core::{
    ComposerConfig, FixedClock, Goal, GoalComposer, GoalListQuery, GoalRepository, GoalService,
    GoalTask, GoalWindow, RepoError, SqliteGoalRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_goal(title: &str, created_at: i64) -> Goal {
    let tasks = vec![
        GoalTask::new("Practice vocabulary (30 min)").unwrap(),
        GoalTask::new("Write 5 sentences").unwrap(),
    ];
    let window = GoalWindow::new(day(2026, 1, 1), day(2026, 4, 1)).unwrap();
    Goal::new(title, tasks, Some(window), created_at).unwrap()
}

#[test]
fn create_and_get_roundtrip_preserves_task_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::try_new(&conn).unwrap();

    let mut goal = sample_goal("Learn Spanish", 1_000);
    goal.tasks.reverse();
    let id = repo.create_goal(&goal).unwrap();

    let loaded = repo.get_goal(id).unwrap().unwrap();
    assert_eq!(loaded, goal);
    assert_eq!(loaded.tasks[0].text, "Write 5 sentences");
}

#[test]
fn goal_without_window_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::try_new(&conn).unwrap();

    let goal = Goal::new("No dates", vec![GoalTask::new("A").unwrap()], None, 5).unwrap();
    repo.create_goal(&goal).unwrap();

    assert_eq!(repo.get_goal(goal.uuid).unwrap().unwrap().window, None);
}

#[test]
fn get_missing_goal_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::try_new(&conn).unwrap();
    assert!(repo.get_goal(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn create_rejects_invalid_goal_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::try_new(&conn).unwrap();

    let mut goal = sample_goal("Valid", 1);
    goal.tasks.clear();

    assert!(matches!(
        repo.create_goal(&goal),
        Err(RepoError::Validation(_))
    ));
    assert_eq!(repo.count_goals().unwrap(), 0);
}

#[test]
fn duplicate_goal_insert_rolls_back_tasks() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::try_new(&conn).unwrap();
    let goal = sample_goal("Once", 1);
    repo.create_goal(&goal).unwrap();

    assert!(matches!(repo.create_goal(&goal), Err(RepoError::Db(_))));

    let task_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM goal_tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(task_rows, 2);
}

#[test]
fn list_goals_is_newest_first_with_paging() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::try_new(&conn).unwrap();
    for (title, created_at) in [("old", 1), ("mid", 2), ("new", 3)] {
        repo.create_goal(&sample_goal(title, created_at)).unwrap();
    }

    let all = repo.list_goals(&GoalListQuery::default()).unwrap();
    let titles: Vec<_> = all.iter().map(|goal| goal.title.as_str()).collect();
    assert_eq!(titles, vec!["new", "mid", "old"]);

    let page = repo
        .list_goals(&GoalListQuery {
            limit: Some(1),
            offset: 1,
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "mid");
}

#[test]
fn read_rejects_corrupted_dates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::try_new(&conn).unwrap();
    let goal = sample_goal("Corrupt", 1);
    repo.create_goal(&goal).unwrap();

    conn.execute(
        "UPDATE goals SET start_date = '2026-13-01', finish_date = '2026-13-02' WHERE uuid = ?1;",
        [goal.uuid.to_string()],
    )
    .unwrap();

    let err = repo.get_goal(goal.uuid).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "unexpected: {err}");
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteGoalRepository::try_new(&conn),
        Err(RepoError::SchemaNotReady { found: 0, .. })
    ));
}

#[test]
fn service_persists_finalized_composition_and_reports_quota() {
    let conn = open_db_in_memory().unwrap();
    let service = GoalService::new(SqliteGoalRepository::try_new(&conn).unwrap());

    let mut composer = GoalComposer::new(
        ComposerConfig::default(),
        FixedClock::new(day(2026, 2, 26)),
    );
    composer.open_schedule().unwrap().set_goal_name("Run 5k");
    composer.continue_from_schedule().unwrap();
    let goal = composer.finalize("Get fit").unwrap();

    let id = service.create_goal(&goal).unwrap();
    assert_eq!(service.require_goal(id).unwrap(), goal);

    let quota = service.quota(3).unwrap();
    assert_eq!(quota.label(), "1/3");
    assert!(!quota.is_full());

    let missing = Uuid::new_v4();
    assert!(matches!(
        service.require_goal(missing),
        Err(RepoError::NotFound(id)) if id == missing
    ));
}
