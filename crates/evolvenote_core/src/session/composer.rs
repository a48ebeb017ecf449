//! Goal composition session spanning the task-list and schedule screens.
//!
//! # Responsibility
//! - Wire the draft store, handoff channel and schedule draft into one flow.
//! - Gate the schedule screen on capacity and the return on a goal name.
//! - Produce a finalized `Goal` for external creation.
//!
//! # Invariants
//! - A published title yields at most one task (edge-triggered observer).
//! - The schedule draft exists only while the schedule screen is on top.
//! - Every task added through the schedule screen keeps its own window
//!   until it is removed.
//! - The session performs no I/O.

use crate::clock::Clock;
use crate::config::ComposerConfig;
use crate::draft::store::{AddOutcome, GoalDraftStore, ReorderError};
use crate::handoff::channel::HandoffObserver;
use crate::model::goal::{Goal, GoalValidationError, GoalWindow};
use crate::model::task::{GoalTask, TaskId};
use crate::navigation::{Navigator, Route};
use crate::schedule::draft::ScheduleDraft;
use log::{error, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Policy rejections surfaced by the composition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// Draft is full; the add control should be disabled.
    CapacityReached { capacity: usize },
    /// Goal name is blank; the continue control should be disabled.
    GoalNameRequired,
    /// Operation needs the schedule screen on top.
    ScheduleNotOpen,
    /// Schedule screen is already on top.
    ScheduleAlreadyOpen,
    /// The list screen did not receive the title published on return.
    HandoffNotDelivered,
    Reorder(ReorderError),
    Goal(GoalValidationError),
}

impl Display for ComposeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityReached { capacity } => {
                write!(f, "task limit of {capacity} reached for this tier")
            }
            Self::GoalNameRequired => write!(f, "goal name must not be empty"),
            Self::ScheduleNotOpen => write!(f, "schedule screen is not open"),
            Self::ScheduleAlreadyOpen => write!(f, "schedule screen is already open"),
            Self::HandoffNotDelivered => {
                write!(f, "task list did not receive the returned goal name")
            }
            Self::Reorder(err) => write!(f, "{err}"),
            Self::Goal(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ComposeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Reorder(err) => Some(err),
            Self::Goal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ReorderError> for ComposeError {
    fn from(value: ReorderError) -> Self {
        Self::Reorder(value)
    }
}

impl From<GoalValidationError> for ComposeError {
    fn from(value: GoalValidationError) -> Self {
        Self::Goal(value)
    }
}

/// One goal being composed, from list-screen mount to finalization.
pub struct GoalComposer<C: Clock> {
    config: ComposerConfig,
    clock: C,
    navigator: Navigator,
    observer: HandoffObserver,
    store: GoalDraftStore,
    schedule: Option<ScheduleDraft>,
    task_windows: HashMap<TaskId, GoalWindow>,
}

impl<C: Clock> GoalComposer<C> {
    /// Mounts the task-list screen on top of home with an empty draft.
    pub fn new(config: ComposerConfig, clock: C) -> Self {
        let mut navigator = Navigator::new(Route::Home);
        navigator.push(Route::TaskList);
        let mut composer = Self {
            config,
            clock,
            navigator,
            observer: HandoffObserver::new(),
            store: GoalDraftStore::new(config.task_capacity),
            schedule: None,
            task_windows: HashMap::new(),
        };
        composer.observe_handoff();
        info!(
            "event=compose_start module=session status=ok capacity={}",
            config.task_capacity
        );
        composer
    }

    /// Opens the schedule screen with a fresh draft.
    ///
    /// # Errors
    /// - `CapacityReached` when the draft is full.
    /// - `ScheduleAlreadyOpen` when the schedule screen is already on top.
    pub fn open_schedule(&mut self) -> Result<&mut ScheduleDraft, ComposeError> {
        if self.store.capacity_reached() {
            warn!(
                "event=compose_open_schedule module=session status=error error_code=capacity_reached capacity={}",
                self.store.capacity()
            );
            return Err(ComposeError::CapacityReached {
                capacity: self.store.capacity(),
            });
        }
        if self.navigator.current() == Route::Schedule {
            return Err(ComposeError::ScheduleAlreadyOpen);
        }

        self.navigator.push(Route::Schedule);
        Ok(self
            .schedule
            .insert(ScheduleDraft::new(self.clock.today(), &self.config)))
    }

    pub fn schedule(&self) -> Option<&ScheduleDraft> {
        self.schedule.as_ref()
    }

    pub fn schedule_mut(&mut self) -> Option<&mut ScheduleDraft> {
        self.schedule.as_mut()
    }

    /// Confirms the schedule and returns to the task list with its title.
    ///
    /// The title travels with the transition and is consumed by the list
    /// observer before this call returns. Returns the outcome of that add;
    /// an added task keeps the confirmed window.
    ///
    /// # Errors
    /// - `ScheduleNotOpen` when no schedule draft is active.
    /// - `GoalNameRequired` when the goal name is blank; the draft is kept.
    /// - `HandoffNotDelivered` when the list observer consumed nothing.
    pub fn continue_from_schedule(&mut self) -> Result<AddOutcome, ComposeError> {
        let schedule = self.schedule.as_ref().ok_or(ComposeError::ScheduleNotOpen)?;
        if !schedule.can_continue() {
            return Err(ComposeError::GoalNameRequired);
        }

        let title = schedule.goal_name().to_string();
        let window = schedule.window();
        self.schedule = None;
        self.navigator.return_with_title(Route::TaskList, title);

        let Some(outcome) = self.observe_handoff() else {
            error!(
                "event=compose_continue module=session status=error error_code=handoff_not_delivered"
            );
            return Err(ComposeError::HandoffNotDelivered);
        };
        if let AddOutcome::Added(id) = outcome {
            self.task_windows.insert(id, window);
        }
        Ok(outcome)
    }

    /// Leaves the schedule screen without publishing anything.
    pub fn cancel_schedule(&mut self) -> Result<(), ComposeError> {
        if self.schedule.take().is_none() {
            return Err(ComposeError::ScheduleNotOpen);
        }
        self.navigator.back();
        self.navigator.clear_param();
        info!("event=compose_cancel_schedule module=session status=ok");
        Ok(())
    }

    /// List-screen observer; call on mount and on every render.
    ///
    /// Returns `Some` only when a new payload was consumed in this call.
    pub fn observe_handoff(&mut self) -> Option<AddOutcome> {
        if self.navigator.current() != Route::TaskList {
            return None;
        }
        let title = self.observer.poll(self.navigator.handoff_mut())?;
        Some(self.store.add(title))
    }

    pub fn remove_task(&mut self, id: TaskId) -> Option<GoalTask> {
        let removed = self.store.remove(id)?;
        self.task_windows.remove(&id);
        Some(removed)
    }

    pub fn reorder_tasks(&mut self, new_order: Vec<GoalTask>) -> Result<(), ComposeError> {
        self.store.reorder(new_order).map_err(Into::into)
    }

    pub fn reorder_task_ids(&mut self, order: &[TaskId]) -> Result<(), ComposeError> {
        self.store.reorder_by_ids(order).map_err(Into::into)
    }

    pub fn task(&self, id: TaskId) -> Option<&GoalTask> {
        self.store.get(id)
    }

    pub fn tasks(&self) -> &[GoalTask] {
        self.store.tasks()
    }

    pub fn capacity_reached(&self) -> bool {
        self.store.capacity_reached()
    }

    pub fn store(&self) -> &GoalDraftStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Schedule confirmed for one task, shown in its details dialog.
    pub fn task_window(&self, id: TaskId) -> Option<GoalWindow> {
        self.task_windows.get(&id).copied()
    }

    /// Window covering every scheduled task: earliest start, latest finish.
    pub fn goal_window(&self) -> Option<GoalWindow> {
        self.store
            .tasks()
            .iter()
            .filter_map(|task| self.task_window(task.id))
            .reduce(GoalWindow::span)
    }

    /// Builds the finalized goal from the current draft.
    ///
    /// # Errors
    /// - `Goal(BlankTitle)` or `Goal(NoTasks)` when the draft is incomplete.
    pub fn finalize(&self, title: &str) -> Result<Goal, ComposeError> {
        let goal = Goal::new(
            title,
            self.store.tasks().to_vec(),
            self.goal_window(),
            self.clock.now_epoch_ms(),
        )?;
        info!(
            "event=compose_finalize module=session status=ok goal_id={} task_count={}",
            goal.uuid,
            goal.tasks.len()
        );
        Ok(goal)
    }
}
