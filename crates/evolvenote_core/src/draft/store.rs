//! Ordered task store for a goal being composed.
//!
//! # Responsibility
//! - Own the in-progress task list and its user-controlled order.
//! - Enforce the tier capacity on every addition.
//!
//! # Invariants
//! - `tasks.len() <= capacity` at all times.
//! - No two tasks share a `TaskId`; ids are never regenerated by reorder.
//! - Rejected mutations leave the store untouched.

use crate::model::task::{GoalTask, TaskId};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result of one `add` attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Task was appended at the end with this id.
    Added(TaskId),
    /// Store is full; nothing changed.
    CapacityReached,
    /// Title was empty; nothing changed.
    EmptyTitle,
}

impl AddOutcome {
    /// Returns the new task id when the add succeeded.
    pub fn added_id(self) -> Option<TaskId> {
        match self {
            Self::Added(id) => Some(id),
            _ => None,
        }
    }
}

/// Reasons a proposed order is not a permutation of the stored tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    LengthMismatch { expected: usize, actual: usize },
    UnknownTask(TaskId),
    DuplicateTask(TaskId),
    /// Entry id exists but its content differs from the stored task.
    TaskChanged(TaskId),
}

impl Display for ReorderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "reorder expected {expected} task(s) but received {actual}"
            ),
            Self::UnknownTask(id) => write!(f, "reorder references unknown task: {id}"),
            Self::DuplicateTask(id) => write!(f, "reorder lists task more than once: {id}"),
            Self::TaskChanged(id) => write!(f, "reorder modified task content: {id}"),
        }
    }
}

impl Error for ReorderError {}

/// In-memory ordered collection of tasks for one goal draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraftStore {
    tasks: Vec<GoalTask>,
    capacity: usize,
}

impl GoalDraftStore {
    /// Creates an empty store with a fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            tasks: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a task with a fresh id unless the store is full.
    ///
    /// The title is stored verbatim; only emptiness is checked.
    pub fn add(&mut self, title: impl Into<String>) -> AddOutcome {
        if self.capacity_reached() {
            info!(
                "event=draft_add module=draft status=skipped reason=capacity_reached task_count={} capacity={}",
                self.tasks.len(),
                self.capacity
            );
            return AddOutcome::CapacityReached;
        }

        let task = match GoalTask::new(title) {
            Ok(task) => task,
            Err(_) => {
                warn!("event=draft_add module=draft status=skipped reason=empty_title");
                return AddOutcome::EmptyTitle;
            }
        };

        let id = task.id;
        self.tasks.push(task);
        info!(
            "event=draft_add module=draft status=ok task_id={} task_count={} capacity={}",
            id,
            self.tasks.len(),
            self.capacity
        );
        AddOutcome::Added(id)
    }

    /// Removes the task with `id`, keeping the relative order of the rest.
    ///
    /// Returns the removed task, or `None` when no task matched.
    pub fn remove(&mut self, id: TaskId) -> Option<GoalTask> {
        let Some(index) = self.position(id) else {
            debug!("event=draft_remove module=draft status=skipped reason=not_found task_id={id}");
            return None;
        };
        let removed = self.tasks.remove(index);
        info!(
            "event=draft_remove module=draft status=ok task_id={} task_count={}",
            id,
            self.tasks.len()
        );
        Some(removed)
    }

    /// Replaces the current order with `new_order` after a completed drag.
    ///
    /// # Errors
    /// - Returns `ReorderError` when `new_order` is not a permutation of the
    ///   stored tasks. The store is unchanged in that case.
    pub fn reorder(&mut self, new_order: Vec<GoalTask>) -> Result<(), ReorderError> {
        self.check_permutation(new_order.iter().map(|task| task.id))?;
        for task in &new_order {
            let stored = self.get(task.id).ok_or(ReorderError::UnknownTask(task.id))?;
            if stored != task {
                return Err(ReorderError::TaskChanged(task.id));
            }
        }

        self.tasks = new_order;
        info!(
            "event=draft_reorder module=draft status=ok task_count={}",
            self.tasks.len()
        );
        Ok(())
    }

    /// Reorders using ids only, as delivered by the gesture bridge.
    pub fn reorder_by_ids(&mut self, order: &[TaskId]) -> Result<(), ReorderError> {
        self.check_permutation(order.iter().copied())?;
        let reordered = order
            .iter()
            .map(|id| {
                self.get(*id)
                    .cloned()
                    .ok_or(ReorderError::UnknownTask(*id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.tasks = reordered;
        info!(
            "event=draft_reorder module=draft status=ok task_count={}",
            self.tasks.len()
        );
        Ok(())
    }

    /// Whether further additions would be rejected.
    pub fn capacity_reached(&self) -> bool {
        self.tasks.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in current display order.
    pub fn tasks(&self) -> &[GoalTask] {
        &self.tasks
    }

    /// Looks up one task, e.g. for the details dialog.
    pub fn get(&self, id: TaskId) -> Option<&GoalTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Zero-based display position of one task.
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn check_permutation(
        &self,
        order: impl ExactSizeIterator<Item = TaskId>,
    ) -> Result<(), ReorderError> {
        if order.len() != self.tasks.len() {
            warn!(
                "event=draft_reorder module=draft status=error error_code=length_mismatch expected={} actual={}",
                self.tasks.len(),
                order.len()
            );
            return Err(ReorderError::LengthMismatch {
                expected: self.tasks.len(),
                actual: order.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.tasks.len());
        for id in order {
            if self.position(id).is_none() {
                warn!("event=draft_reorder module=draft status=error error_code=unknown_task task_id={id}");
                return Err(ReorderError::UnknownTask(id));
            }
            if !seen.insert(id) {
                warn!("event=draft_reorder module=draft status=error error_code=duplicate_task task_id={id}");
                return Err(ReorderError::DuplicateTask(id));
            }
        }
        Ok(())
    }
}
