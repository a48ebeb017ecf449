//! Goal task domain model.
//!
//! # Responsibility
//! - Define the sub-task record assembled into a goal draft.
//! - Keep identity generation in one place.
//!
//! # Invariants
//! - `id` is generated at creation time and never reused for another task.
//! - `text` is never empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one task inside a goal draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a task id from its hyphenated string form.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        let parsed = Uuid::parse_str(value.trim())
            .map_err(|_| TaskValidationError::InvalidId(value.to_string()))?;
        if parsed.is_nil() {
            return Err(TaskValidationError::InvalidId(value.to_string()));
        }
        Ok(Self(parsed))
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for task construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task text is empty.
    EmptyText,
    /// Identifier string is not a usable task id.
    InvalidId(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::InvalidId(value) => write!(f, "invalid task id: {value}"),
        }
    }
}

impl Error for TaskValidationError {}

/// One ordered entry of a goal being composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTask {
    pub id: TaskId,
    /// User-supplied label, stored exactly as received.
    pub text: String,
}

impl GoalTask {
    /// Creates a task with a freshly generated id.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `text` is empty. Whitespace is kept as-is.
    pub fn new(text: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::generate(), text)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used when rebuilding tasks read back from storage.
    pub fn with_id(id: TaskId, text: impl Into<String>) -> Result<Self, TaskValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(Self { id, text })
    }
}

#[cfg(test)]
mod tests {
    use super::{GoalTask, TaskId, TaskValidationError};

    #[test]
    fn new_task_keeps_text_untrimmed() {
        let task = GoalTask::new("  read 10 pages ").expect("non-empty text");
        assert_eq!(task.text, "  read 10 pages ");
    }

    #[test]
    fn new_task_rejects_empty_text() {
        assert_eq!(
            GoalTask::new("").expect_err("empty text must fail"),
            TaskValidationError::EmptyText
        );
    }

    #[test]
    fn task_id_parses_its_display_form() {
        let id = TaskId::generate();
        assert_eq!(TaskId::parse(&id.to_string()).expect("roundtrip"), id);
    }

    #[test]
    fn task_id_rejects_nil_and_garbage() {
        assert!(TaskId::parse("00000000-0000-0000-0000-000000000000").is_err());
        assert!(TaskId::parse("task-123").is_err());
    }
}
