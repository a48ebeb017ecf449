use evolvenote_core::{AddOutcome, GoalDraftStore, GoalTask, ReorderError, TaskId};
use std::collections::HashSet;

fn store_with(titles: &[&str]) -> GoalDraftStore {
    let mut store = GoalDraftStore::new(3);
    for title in titles {
        assert!(matches!(store.add(*title), AddOutcome::Added(_)));
    }
    store
}

fn texts(store: &GoalDraftStore) -> Vec<&str> {
    store.tasks().iter().map(|task| task.text.as_str()).collect()
}

#[test]
fn fourth_add_is_rejected_at_free_capacity() {
    let mut store = store_with(&["A", "B", "C"]);
    assert_eq!(store.len(), 3);
    assert!(store.capacity_reached());

    let before = store.clone();
    assert_eq!(store.add("D"), AddOutcome::CapacityReached);
    assert_eq!(store, before);
}

#[test]
fn add_appends_at_end_and_keeps_title_verbatim() {
    let mut store = store_with(&["first"]);
    let id = store.add(" second ").added_id().unwrap();

    assert_eq!(texts(&store), vec!["first", " second "]);
    assert_eq!(store.position(id), Some(1));
}

#[test]
fn empty_title_is_rejected_without_change() {
    let mut store = GoalDraftStore::new(3);
    assert_eq!(store.add(""), AddOutcome::EmptyTitle);
    assert!(store.is_empty());
}

#[test]
fn ids_stay_unique_across_add_and_remove() {
    let mut store = GoalDraftStore::new(3);
    let mut seen = HashSet::new();
    for round in 0..20 {
        let id = store.add(format!("task {round}")).added_id().unwrap();
        assert!(seen.insert(id), "id reused: {id}");
        if store.capacity_reached() {
            let first = store.tasks()[0].id;
            store.remove(first).unwrap();
        }
    }
    let live: HashSet<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(live.len(), store.len());
}

#[test]
fn remove_twice_is_idempotent_and_keeps_order() {
    let mut store = store_with(&["A", "B", "C"]);
    let middle = store.tasks()[1].id;

    let removed = store.remove(middle).unwrap();
    assert_eq!(removed.text, "B");
    assert_eq!(texts(&store), vec!["A", "C"]);

    assert_eq!(store.remove(middle), None);
    assert_eq!(texts(&store), vec!["A", "C"]);
    assert!(!store.capacity_reached());
}

#[test]
fn reorder_with_permutation_applies_exactly() {
    let mut store = store_with(&["A", "B", "C"]);
    let mut permutation = store.tasks().to_vec();
    permutation.rotate_left(1);

    store.reorder(permutation.clone()).unwrap();

    assert_eq!(store.tasks(), permutation.as_slice());
    assert_eq!(texts(&store), vec!["B", "C", "A"]);
}

#[test]
fn reorder_rejects_non_permutations_and_leaves_store_unchanged() {
    let mut store = store_with(&["A", "B", "C"]);
    let before = store.clone();
    let tasks = store.tasks().to_vec();

    let short = tasks[..2].to_vec();
    assert_eq!(
        store.reorder(short).unwrap_err(),
        ReorderError::LengthMismatch {
            expected: 3,
            actual: 2
        }
    );

    let stranger = GoalTask::new("X").unwrap();
    let with_stranger = vec![tasks[0].clone(), tasks[1].clone(), stranger.clone()];
    assert_eq!(
        store.reorder(with_stranger).unwrap_err(),
        ReorderError::UnknownTask(stranger.id)
    );

    let duplicated = vec![tasks[0].clone(), tasks[0].clone(), tasks[1].clone()];
    assert_eq!(
        store.reorder(duplicated).unwrap_err(),
        ReorderError::DuplicateTask(tasks[0].id)
    );

    let mut edited = tasks.clone();
    edited[2].text = "renamed".to_string();
    assert_eq!(
        store.reorder(edited).unwrap_err(),
        ReorderError::TaskChanged(tasks[2].id)
    );

    assert_eq!(store, before);
}

#[test]
fn reorder_by_ids_keeps_task_identity() {
    let mut store = store_with(&["A", "B", "C"]);
    let ids: Vec<TaskId> = store.tasks().iter().rev().map(|task| task.id).collect();

    store.reorder_by_ids(&ids).unwrap();

    assert_eq!(texts(&store), vec!["C", "B", "A"]);
    let reordered: Vec<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(reordered, ids);
}

#[test]
fn get_returns_task_for_details_view() {
    let store = store_with(&["Practice vocabulary (30 min)"]);
    let id = store.tasks()[0].id;
    assert_eq!(
        store.get(id).map(|task| task.text.as_str()),
        Some("Practice vocabulary (30 min)")
    );
    assert!(store.get(TaskId::generate()).is_none());
}

#[test]
fn task_serializes_with_plain_id_string() {
    let task = GoalTask::new("Write 5 sentences").unwrap();
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task.id.to_string());
    assert_eq!(json["text"], "Write 5 sentences");
}
