//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the goal composition flow to Dart via FRB as sync calls.
//! - Hold the single process-wide composition session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every failure is returned as `ok=false` with a readable message.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use evolvenote_core::db::open_db;
use evolvenote_core::{
    core_version as core_version_inner, format_display_date, init_logging as init_logging_inner,
    ping as ping_inner, AddOutcome, Clock, ComposerConfig, FinishMode, GoalComposer,
    GoalListQuery, GoalProgress, GoalService, GoalWindow, PickerDismissal, ScheduleDraft,
    SqliteGoalRepository, StartMode, SystemClock, TaskId,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const GOAL_DB_FILE_NAME: &str = "evolvenote_goals.sqlite3";
const FREE_TIER_GOAL_LIMIT: u32 = 3;
const DATE_WIRE_FORMAT: &str = "%Y-%m-%d";

static GOAL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<GoalComposer<SystemClock>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalTaskItem {
    pub task_id: String,
    pub text: String,
}

/// Task-list screen state envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraftView {
    pub ok: bool,
    pub message: String,
    /// Tasks in display order.
    pub tasks: Vec<GoalTaskItem>,
    pub capacity: u32,
    /// When true the add/create controls must be disabled.
    pub capacity_reached: bool,
    /// Top screen (`home|task_list|schedule`).
    pub route: String,
}

impl GoalDraftView {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            tasks: Vec::new(),
            capacity: 0,
            capacity_reached: true,
            route: String::new(),
        }
    }
}

/// Schedule screen state envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    pub ok: bool,
    pub message: String,
    pub goal_name: String,
    pub can_continue: bool,
    /// `today|tomorrow|custom`.
    pub start_mode: String,
    pub start_date: String,
    /// `DD/MM/YYYY` label shown under the start tabs.
    pub start_label: String,
    pub start_minimum: String,
    pub start_picker_visible: bool,
    /// `by_date|by_duration`.
    pub finish_mode: String,
    pub finish_date: String,
    pub finish_label: String,
    pub finish_minimum: String,
    pub finish_picker_visible: bool,
    pub duration_days: u32,
    pub duration_months: u32,
}

impl ScheduleView {
    fn from_draft(draft: &ScheduleDraft, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            goal_name: draft.goal_name().to_string(),
            can_continue: draft.can_continue(),
            start_mode: draft.start_mode().as_str().to_string(),
            start_date: date_to_wire(draft.start_date()),
            start_label: format_display_date(draft.start_date()),
            start_minimum: date_to_wire(draft.start_minimum()),
            start_picker_visible: draft.start_picker_visible(),
            finish_mode: draft.finish_mode().as_str().to_string(),
            finish_date: date_to_wire(draft.finish_date()),
            finish_label: format_display_date(draft.finish_date()),
            finish_minimum: date_to_wire(draft.finish_minimum()),
            finish_picker_visible: draft.finish_picker_visible(),
            duration_days: draft.duration_days(),
            duration_months: draft.duration_months(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            goal_name: String::new(),
            can_continue: false,
            start_mode: String::new(),
            start_date: String::new(),
            start_label: String::new(),
            start_minimum: String::new(),
            start_picker_visible: false,
            finish_mode: String::new(),
            finish_date: String::new(),
            finish_label: String::new(),
            finish_minimum: String::new(),
            finish_picker_visible: false,
            duration_days: 0,
            duration_months: 0,
        }
    }
}

/// "Task Info" dialog content for one draft task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalTaskDetails {
    pub ok: bool,
    pub message: String,
    pub task_id: String,
    pub text: String,
    /// 1-based position in the list.
    pub position: u32,
    /// `DD/MM/YYYY`; empty when the task has no confirmed schedule.
    pub start_label: String,
    pub finish_label: String,
}

impl GoalTaskDetails {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            task_id: String::new(),
            text: String::new(),
            position: 0,
            start_label: String::new(),
            finish_label: String::new(),
        }
    }
}

/// Home-screen progress card for the most recently created goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalHomeView {
    pub ok: bool,
    pub message: String,
    /// False when no goal has been created yet.
    pub has_goal: bool,
    pub goal_id: String,
    pub title: String,
    pub days_completed: u32,
    pub days_left: u32,
    pub percent: u32,
    /// `DD/MM/YYYY` deadline; empty for an unscheduled goal.
    pub deadline_label: String,
}

impl GoalHomeView {
    fn empty(ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
            has_goal: false,
            goal_id: String::new(),
            title: String::new(),
            days_completed: 0,
            days_left: 0,
            percent: 0,
            deadline_label: String::new(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalActionResponse {
    pub ok: bool,
    /// Created goal ID on success.
    pub goal_id: Option<String>,
    pub message: String,
}

/// Home-screen goal counter ("1/3 GOALS").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalQuotaView {
    pub ok: bool,
    pub used: u32,
    pub limit: u32,
    pub label: String,
    pub message: String,
}

/// Starts a new composition session, discarding any previous draft.
///
/// Input semantics:
/// - `platform`: host OS name; `ios` keeps date pickers open after confirm.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_session_start(platform: String) -> GoalDraftView {
    let config = ComposerConfig::default()
        .with_picker_dismissal(PickerDismissal::for_platform(platform.as_str()));
    match SESSION.lock() {
        Ok(mut guard) => {
            let composer = guard.insert(GoalComposer::new(config, SystemClock));
            draft_view(composer, "Session started.")
        }
        Err(_) => GoalDraftView::failure("goal_session_start failed: session lock poisoned"),
    }
}

/// Renders the task list. Consumes a pending handoff title at most once.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_draft_view() -> GoalDraftView {
    with_session(|composer| {
        let message = match composer.observe_handoff() {
            Some(outcome) => add_outcome_message(outcome),
            None => String::new(),
        };
        Ok(draft_view(composer, message))
    })
    .unwrap_or_else(|err| GoalDraftView::failure(format!("goal_draft_view failed: {err}")))
}

/// Opens the schedule screen; rejected at task capacity.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_open() -> ScheduleView {
    schedule_call("goal_schedule_open", |composer| {
        let draft = composer.open_schedule().map_err(|err| err.to_string())?;
        Ok(ScheduleView::from_draft(draft, "Schedule opened."))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_set_name(name: String) -> ScheduleView {
    edit_schedule("goal_schedule_set_name", |draft| {
        draft.set_goal_name(name);
        Ok(String::new())
    })
}

/// Selects a start tab (`today|tomorrow|custom`).
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_select_start(mode: String) -> ScheduleView {
    edit_schedule("goal_schedule_select_start", |draft| {
        let mode = StartMode::parse(&mode).ok_or_else(|| format!("unknown start mode `{mode}`"))?;
        draft.select_start_mode(mode);
        Ok(String::new())
    })
}

/// Applies a start-picker result; `None` means the picker was cancelled.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_confirm_start(date: Option<String>) -> ScheduleView {
    edit_schedule("goal_schedule_confirm_start", |draft| {
        let date = date.as_deref().map(parse_wire_date).transpose()?;
        Ok(format!("{:?}", draft.confirm_start_date(date)))
    })
}

/// Selects a finish tab (`by_date|by_duration`).
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_select_finish(mode: String) -> ScheduleView {
    edit_schedule("goal_schedule_select_finish", |draft| {
        let mode =
            FinishMode::parse(&mode).ok_or_else(|| format!("unknown finish mode `{mode}`"))?;
        draft.select_finish_mode(mode);
        Ok(String::new())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_open_finish_picker() -> ScheduleView {
    edit_schedule("goal_schedule_open_finish_picker", |draft| {
        draft.open_finish_picker();
        Ok(String::new())
    })
}

/// Applies a finish-picker result; `None` means the picker was cancelled.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_confirm_finish(date: Option<String>) -> ScheduleView {
    edit_schedule("goal_schedule_confirm_finish", |draft| {
        let date = date.as_deref().map(parse_wire_date).transpose()?;
        Ok(format!("{:?}", draft.confirm_finish_date(date)))
    })
}

/// Steps a duration counter (`days|months`) by one in the sign of `delta`.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_step(unit: String, delta: i32) -> ScheduleView {
    edit_schedule("goal_schedule_step", |draft| {
        match (unit.trim(), delta.signum()) {
            (_, 0) => {}
            ("days", 1) => {
                draft.increment_days();
            }
            ("days", _) => {
                draft.decrement_days();
            }
            ("months", 1) => {
                draft.increment_months();
            }
            ("months", _) => {
                draft.decrement_months();
            }
            (other, _) => return Err(format!("unknown duration unit `{other}`")),
        }
        Ok(String::new())
    })
}

/// Confirms the schedule and returns to the task list with the new task.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_continue() -> GoalDraftView {
    with_session(|composer| {
        let outcome = composer
            .continue_from_schedule()
            .map_err(|err| err.to_string())?;
        Ok(draft_view(composer, add_outcome_message(outcome)))
    })
    .unwrap_or_else(|err| GoalDraftView::failure(format!("goal_schedule_continue failed: {err}")))
}

/// Leaves the schedule screen without adding anything.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_schedule_cancel() -> GoalDraftView {
    with_session(|composer| {
        composer.cancel_schedule().map_err(|err| err.to_string())?;
        Ok(draft_view(composer, String::new()))
    })
    .unwrap_or_else(|err| GoalDraftView::failure(format!("goal_schedule_cancel failed: {err}")))
}

/// Deletes one task. Unknown ids are a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_task_remove(task_id: String) -> GoalDraftView {
    with_session(|composer| {
        let id = TaskId::parse(&task_id).map_err(|err| err.to_string())?;
        let message = match composer.remove_task(id) {
            Some(_) => "Task removed.",
            None => "Task not found.",
        };
        Ok(draft_view(composer, message))
    })
    .unwrap_or_else(|err| GoalDraftView::failure(format!("goal_task_remove failed: {err}")))
}

/// Commits the order produced by a finished drag gesture.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_task_reorder(task_ids: Vec<String>) -> GoalDraftView {
    with_session(|composer| {
        let order = task_ids
            .iter()
            .map(|raw| TaskId::parse(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| err.to_string())?;
        composer
            .reorder_task_ids(&order)
            .map_err(|err| err.to_string())?;
        Ok(draft_view(composer, "Order saved."))
    })
    .unwrap_or_else(|err| GoalDraftView::failure(format!("goal_task_reorder failed: {err}")))
}

/// Details of one draft task, including the schedule it was added with.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_task_details(task_id: String) -> GoalTaskDetails {
    with_session(|composer| {
        let id = TaskId::parse(&task_id).map_err(|err| err.to_string())?;
        let task = composer
            .task(id)
            .ok_or_else(|| "task not found".to_string())?;
        let position = composer.store().position(id).unwrap_or(0) + 1;
        let window = composer.task_window(id);
        Ok(GoalTaskDetails {
            ok: true,
            message: String::new(),
            task_id: task.id.to_string(),
            text: task.text.clone(),
            position: u32::try_from(position).unwrap_or(u32::MAX),
            start_label: window_label(window, |w| w.start),
            finish_label: window_label(window, |w| w.finish),
        })
    })
    .unwrap_or_else(|err| GoalTaskDetails::failure(format!("goal_task_details failed: {err}")))
}

/// Finalizes the draft into a goal, stores it, and ends the session.
///
/// # FFI contract
/// - DB-backed execution; the session survives when creation fails.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_create(title: String) -> GoalActionResponse {
    let mut guard = match SESSION.lock() {
        Ok(guard) => guard,
        Err(_) => return action_failure("goal_create failed: session lock poisoned"),
    };
    let Some(composer) = guard.as_ref() else {
        return action_failure("goal_create failed: no active session");
    };

    let goal = match composer.finalize(title.as_str()) {
        Ok(goal) => goal,
        Err(err) => return action_failure(format!("goal_create failed: {err}")),
    };
    match with_goal_service(|service| service.create_goal(&goal).map_err(|err| err.to_string())) {
        Ok(goal_id) => {
            *guard = None;
            GoalActionResponse {
                ok: true,
                goal_id: Some(goal_id.to_string()),
                message: "Goal created.".to_string(),
            }
        }
        Err(err) => action_failure(format!("goal_create failed: {err}")),
    }
}

/// Returns created-goal count against the free tier limit.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_quota() -> GoalQuotaView {
    let limit = FREE_TIER_GOAL_LIMIT;
    match with_goal_service(|service| {
        service
            .quota(limit as usize)
            .map_err(|err| err.to_string())
    }) {
        Ok(quota) => GoalQuotaView {
            ok: true,
            used: u32::try_from(quota.used).unwrap_or(u32::MAX),
            limit,
            label: quota.label(),
            message: String::new(),
        },
        Err(err) => GoalQuotaView {
            ok: false,
            used: 0,
            limit,
            label: String::new(),
            message: format!("goal_quota failed: {err}"),
        },
    }
}

/// Progress card for the newest goal, as seen today.
///
/// # FFI contract
/// - DB-backed execution; `has_goal=false` when nothing was created yet.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_home_view() -> GoalHomeView {
    let latest = with_goal_service(|service| {
        let query = GoalListQuery {
            limit: Some(1),
            offset: 0,
        };
        service
            .list_goals(&query)
            .map(|goals| goals.into_iter().next())
            .map_err(|err| err.to_string())
    });
    let goal = match latest {
        Ok(Some(goal)) => goal,
        Ok(None) => return GoalHomeView::empty(true, "No goals yet."),
        Err(err) => return GoalHomeView::empty(false, format!("goal_home_view failed: {err}")),
    };

    let progress = goal
        .window
        .map(|window| GoalProgress::compute(window, SystemClock.today()));
    GoalHomeView {
        ok: true,
        message: String::new(),
        has_goal: true,
        goal_id: goal.uuid.to_string(),
        title: goal.title,
        days_completed: progress.map_or(0, |p| p.days_completed),
        days_left: progress.map_or(0, |p| p.days_left),
        percent: progress.map_or(0, |p| u32::from(p.percent)),
        deadline_label: window_label(goal.window, |w| w.finish),
    }
}

fn with_session<T>(
    f: impl FnOnce(&mut GoalComposer<SystemClock>) -> Result<T, String>,
) -> Result<T, String> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| "session lock poisoned".to_string())?;
    let composer = guard
        .as_mut()
        .ok_or_else(|| "no active session".to_string())?;
    f(composer)
}

fn schedule_call(
    operation: &str,
    f: impl FnOnce(&mut GoalComposer<SystemClock>) -> Result<ScheduleView, String>,
) -> ScheduleView {
    with_session(f).unwrap_or_else(|err| {
        warn!("event=ffi_call module=ffi status=error operation={operation}");
        ScheduleView::failure(format!("{operation} failed: {err}"))
    })
}

fn edit_schedule(
    operation: &str,
    f: impl FnOnce(&mut ScheduleDraft) -> Result<String, String>,
) -> ScheduleView {
    schedule_call(operation, |composer| {
        let draft = composer
            .schedule_mut()
            .ok_or_else(|| "schedule screen is not open".to_string())?;
        let message = f(draft)?;
        Ok(ScheduleView::from_draft(draft, message))
    })
}

fn with_goal_service<T>(
    f: impl FnOnce(&GoalService<SqliteGoalRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_goal_db_path()).map_err(|err| format!("goal DB open failed: {err}"))?;
    let repo = SqliteGoalRepository::try_new(&conn)
        .map_err(|err| format!("goal repo init failed: {err}"))?;
    f(&GoalService::new(repo))
}

fn resolve_goal_db_path() -> PathBuf {
    GOAL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("EVOLVENOTE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(GOAL_DB_FILE_NAME)
        })
        .clone()
}

fn draft_view(composer: &GoalComposer<SystemClock>, message: impl Into<String>) -> GoalDraftView {
    GoalDraftView {
        ok: true,
        message: message.into(),
        tasks: composer
            .tasks()
            .iter()
            .map(|task| GoalTaskItem {
                task_id: task.id.to_string(),
                text: task.text.clone(),
            })
            .collect(),
        capacity: u32::try_from(composer.store().capacity()).unwrap_or(u32::MAX),
        capacity_reached: composer.capacity_reached(),
        route: composer.navigator().current().as_str().to_string(),
    }
}

fn add_outcome_message(outcome: AddOutcome) -> String {
    match outcome {
        AddOutcome::Added(_) => "Task added.".to_string(),
        AddOutcome::CapacityReached => {
            "You've reached the limit of the freemium version.".to_string()
        }
        AddOutcome::EmptyTitle => "Task title was empty.".to_string(),
    }
}

fn window_label(window: Option<GoalWindow>, pick: impl Fn(GoalWindow) -> NaiveDate) -> String {
    window
        .map(|window| format_display_date(pick(window)))
        .unwrap_or_default()
}

fn action_failure(message: impl Into<String>) -> GoalActionResponse {
    GoalActionResponse {
        ok: false,
        goal_id: None,
        message: message.into(),
    }
}

fn parse_wire_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_WIRE_FORMAT)
        .map_err(|_| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}

fn date_to_wire(date: NaiveDate) -> String {
    date.format(DATE_WIRE_FORMAT).to_string()
}
