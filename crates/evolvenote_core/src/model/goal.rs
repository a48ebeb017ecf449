//! Finalized goal model.
//!
//! # Responsibility
//! - Define the record handed to external goal-creation collaborators.
//! - Validate the start/finish window shared by schedule and progress views.
//!
//! # Invariants
//! - `title` is non-blank after trim.
//! - `tasks` is non-empty and keeps user-controlled order.
//! - `window.finish` is never earlier than `window.start`.

use crate::model::task::GoalTask;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a finalized goal.
pub type GoalId = Uuid;

/// Calendar range a goal is planned to run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GoalWindowWire")]
pub struct GoalWindow {
    pub start: NaiveDate,
    pub finish: NaiveDate,
}

#[derive(Deserialize)]
struct GoalWindowWire {
    start: NaiveDate,
    finish: NaiveDate,
}

impl TryFrom<GoalWindowWire> for GoalWindow {
    type Error = GoalValidationError;

    fn try_from(value: GoalWindowWire) -> Result<Self, Self::Error> {
        GoalWindow::new(value.start, value.finish)
    }
}

impl GoalWindow {
    /// Creates a window, rejecting reversed ranges.
    pub fn new(start: NaiveDate, finish: NaiveDate) -> Result<Self, GoalValidationError> {
        if finish < start {
            return Err(GoalValidationError::InvalidWindow { start, finish });
        }
        Ok(Self { start, finish })
    }

    /// Number of whole days between start and finish.
    pub fn total_days(&self) -> i64 {
        (self.finish - self.start).num_days()
    }

    /// Smallest window covering both `self` and `other`.
    pub fn span(self, other: GoalWindow) -> GoalWindow {
        Self {
            start: self.start.min(other.start),
            finish: self.finish.max(other.finish),
        }
    }
}

/// Validation errors for finalized goal data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    BlankTitle,
    NoTasks,
    NilId,
    InvalidWindow { start: NaiveDate, finish: NaiveDate },
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "goal title must not be blank"),
            Self::NoTasks => write!(f, "goal must contain at least one task"),
            Self::NilId => write!(f, "goal id must not be nil"),
            Self::InvalidWindow { start, finish } => {
                write!(f, "finish ({finish}) must be >= start ({start})")
            }
        }
    }
}

impl Error for GoalValidationError {}

/// Goal composed from a draft and ready for external creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub uuid: GoalId,
    pub title: String,
    pub tasks: Vec<GoalTask>,
    pub window: Option<GoalWindow>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Goal {
    /// Builds a goal with a generated id, trimming the title.
    pub fn new(
        title: &str,
        tasks: Vec<GoalTask>,
        window: Option<GoalWindow>,
        created_at: i64,
    ) -> Result<Self, GoalValidationError> {
        let goal = Self {
            uuid: Uuid::new_v4(),
            title: title.trim().to_string(),
            tasks,
            window,
            created_at,
        };
        goal.validate()?;
        Ok(goal)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.uuid.is_nil() {
            return Err(GoalValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::BlankTitle);
        }
        if self.tasks.is_empty() {
            return Err(GoalValidationError::NoTasks);
        }
        if let Some(window) = self.window {
            GoalWindow::new(window.start, window.finish)?;
        }
        Ok(())
    }
}
