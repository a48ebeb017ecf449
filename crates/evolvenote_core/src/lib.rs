//! Core goal-composition logic for EvolveNote.
//! This crate is the single source of truth for draft, handoff and schedule invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod draft;
pub mod handoff;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod progress;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ComposerConfig, PickerDismissal, FREE_TIER_TASK_CAPACITY};
pub use draft::store::{AddOutcome, GoalDraftStore, ReorderError};
pub use handoff::channel::{HandoffChannel, HandoffObserver, NEW_GOAL_TITLE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::goal::{Goal, GoalId, GoalValidationError, GoalWindow};
pub use model::task::{GoalTask, TaskId, TaskValidationError};
pub use navigation::{Navigator, Route};
pub use progress::{GoalProgress, GoalQuota};
pub use repo::goal_repo::{
    GoalListQuery, GoalRepository, RepoError, RepoResult, SqliteGoalRepository,
};
pub use schedule::draft::{
    format_display_date, DateSelection, DurationStepper, FinishMode, ScheduleDraft, StartMode,
};
pub use service::goal_service::GoalService;
pub use session::composer::{ComposeError, GoalComposer};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
