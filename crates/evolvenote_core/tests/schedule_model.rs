use chrono::NaiveDate;
use evolvenote_core::{
    ComposerConfig, DateSelection, FinishMode, PickerDismissal, ScheduleDraft, StartMode,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(2026, 2, 26)
}

fn draft() -> ScheduleDraft {
    ScheduleDraft::new(today(), &ComposerConfig::default())
}

#[test]
fn new_draft_starts_today_and_finishes_by_date() {
    let draft = draft();
    assert_eq!(draft.goal_name(), "");
    assert!(!draft.can_continue());
    assert_eq!(draft.start_mode(), StartMode::Today);
    assert_eq!(draft.start_date(), today());
    assert_eq!(draft.finish_mode(), FinishMode::ByDate);
    assert_eq!(draft.finish_date(), today());
    assert_eq!(draft.duration_days(), 90);
    assert_eq!(draft.duration_months(), 0);
    assert!(!draft.start_picker_visible());
    assert!(!draft.finish_picker_visible());
}

#[test]
fn continue_requires_non_blank_name() {
    let mut draft = draft();
    draft.set_goal_name("   ");
    assert!(!draft.can_continue());
    draft.set_goal_name("Learn Spanish in 90 Days");
    assert!(draft.can_continue());
}

#[test]
fn tomorrow_and_today_tabs_set_date_and_hide_picker() {
    let mut draft = draft();
    draft.select_start_mode(StartMode::Custom);
    assert!(draft.start_picker_visible());

    draft.select_start_mode(StartMode::Tomorrow);
    assert_eq!(draft.start_date(), day(2026, 2, 27));
    assert!(!draft.start_picker_visible());

    draft.select_start_mode(StartMode::Today);
    assert_eq!(draft.start_date(), today());
}

#[test]
fn custom_start_before_today_is_clamped() {
    let mut draft = draft();
    draft.select_start_mode(StartMode::Custom);

    let selection = draft.confirm_start_date(Some(day(2026, 1, 1)));

    assert_eq!(selection, DateSelection::Clamped(today()));
    assert_eq!(draft.start_date(), today());
    assert_eq!(draft.start_minimum(), today());
}

#[test]
fn custom_start_applies_and_auto_hides() {
    let mut draft = draft();
    draft.select_start_mode(StartMode::Custom);

    let selection = draft.confirm_start_date(Some(day(2026, 3, 10)));

    assert_eq!(selection, DateSelection::Applied(day(2026, 3, 10)));
    assert_eq!(draft.start_date(), day(2026, 3, 10));
    assert!(!draft.start_picker_visible());
}

#[test]
fn keep_open_dismissal_leaves_picker_visible() {
    let config = ComposerConfig::default().with_picker_dismissal(PickerDismissal::KeepOpen);
    let mut draft = ScheduleDraft::new(today(), &config);
    draft.select_start_mode(StartMode::Custom);

    draft.confirm_start_date(Some(day(2026, 3, 1)));
    assert!(draft.start_picker_visible());
    draft.confirm_start_date(Some(day(2026, 3, 2)));
    assert_eq!(draft.start_date(), day(2026, 3, 2));
}

#[test]
fn cancelled_picker_keeps_date() {
    let mut draft = draft();
    draft.select_start_mode(StartMode::Custom);
    assert_eq!(draft.confirm_start_date(None), DateSelection::Cancelled);
    assert_eq!(draft.start_date(), today());
    assert!(!draft.start_picker_visible());
}

#[test]
fn start_picker_ignored_outside_custom_mode() {
    let mut draft = draft();
    assert_eq!(
        draft.confirm_start_date(Some(day(2026, 5, 1))),
        DateSelection::Ignored
    );
    assert_eq!(draft.start_date(), today());
}

#[test]
fn finish_date_cannot_precede_start() {
    let mut draft = draft();
    draft.select_start_mode(StartMode::Tomorrow);
    draft.select_finish_mode(FinishMode::ByDate);
    assert!(draft.finish_picker_visible());
    assert_eq!(draft.finish_minimum(), day(2026, 2, 27));

    let selection = draft.confirm_finish_date(Some(today()));

    assert_eq!(selection, DateSelection::Clamped(day(2026, 2, 27)));
    assert_eq!(draft.finish_date(), day(2026, 2, 27));
}

#[test]
fn moving_start_past_finish_lifts_finish() {
    let mut draft = draft();
    draft.select_start_mode(StartMode::Custom);
    draft.confirm_start_date(Some(day(2026, 4, 1)));

    assert_eq!(draft.finish_date(), day(2026, 4, 1));
    assert!(draft.window().finish >= draft.window().start);
}

#[test]
fn duration_steppers_clamp_at_zero() {
    let config = ComposerConfig {
        default_duration_days: 0,
        ..ComposerConfig::default()
    };
    let mut draft = ScheduleDraft::new(today(), &config);
    draft.select_finish_mode(FinishMode::ByDuration);
    assert!(!draft.finish_picker_visible());

    assert_eq!(draft.decrement_days(), 0);
    assert_eq!(draft.duration_days(), 0);
    assert_eq!(draft.decrement_months(), 0);
    assert_eq!(draft.increment_months(), 1);
    assert_eq!(draft.increment_days(), 1);
}

#[test]
fn duration_mode_resolves_months_then_days() {
    let mut draft = draft();
    draft.select_finish_mode(FinishMode::ByDuration);
    draft.increment_months();
    for _ in 0..90 {
        draft.decrement_days();
    }
    draft.increment_days();
    draft.increment_days();

    assert_eq!(draft.resolved_finish_date(), day(2026, 3, 28));
    assert_eq!(draft.window().start, today());
    assert_eq!(draft.window().finish, day(2026, 3, 28));
}

#[test]
fn finish_picker_ignored_in_duration_mode() {
    let mut draft = draft();
    draft.select_finish_mode(FinishMode::ByDuration);
    draft.open_finish_picker();
    assert!(!draft.finish_picker_visible());
    assert_eq!(
        draft.confirm_finish_date(Some(day(2026, 6, 1))),
        DateSelection::Ignored
    );
}
