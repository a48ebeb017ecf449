//! Start/finish configuration for a goal being scheduled.
//!
//! # Responsibility
//! - Drive start-mode and finish-mode tab transitions.
//! - Apply date-picker confirmations under minimum-date constraints.
//! - Hold the day/month duration steppers.
//!
//! # Invariants
//! - `start_date >= today` whenever it was set through the picker.
//! - `finish_date >= start_date` under every transition.
//! - Stepper values never go below zero.
//! - `can_continue()` is false while the goal name is blank.

use crate::config::{ComposerConfig, PickerDismissal};
use crate::model::goal::GoalWindow;
use chrono::{Days, Months, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

/// How the start date is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartMode {
    Today,
    Tomorrow,
    Custom,
}

impl StartMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Custom => "custom",
        }
    }

    /// Parses the wire name produced by `as_str`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "today" => Some(Self::Today),
            "tomorrow" => Some(Self::Tomorrow),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// How the finish of the goal is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishMode {
    ByDate,
    ByDuration,
}

impl FinishMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ByDate => "by_date",
            Self::ByDuration => "by_duration",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "by_date" => Some(Self::ByDate),
            "by_duration" => Some(Self::ByDuration),
            _ => None,
        }
    }
}

/// Outcome of confirming (or cancelling) a date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    /// Selected date was within bounds and applied as-is.
    Applied(NaiveDate),
    /// Selected date was below the minimum; the minimum was applied instead.
    Clamped(NaiveDate),
    /// Picker was dismissed without a date.
    Cancelled,
    /// Picker is not available in the current mode; nothing changed.
    Ignored,
}

/// Unbounded counter with a floor of zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DurationStepper {
    value: u32,
}

impl DurationStepper {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(self) -> u32 {
        self.value
    }

    pub fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    /// Decrements by one, holding at zero.
    pub fn decrement(&mut self) -> u32 {
        self.value = self.value.saturating_sub(1);
        self.value
    }
}

/// Working set of schedule fields, recreated each time the screen mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    goal_name: String,
    today: NaiveDate,
    start_mode: StartMode,
    start_date: NaiveDate,
    start_picker_visible: bool,
    finish_mode: FinishMode,
    finish_date: NaiveDate,
    finish_picker_visible: bool,
    duration_days: DurationStepper,
    duration_months: DurationStepper,
    dismissal: PickerDismissal,
}

impl ScheduleDraft {
    /// Creates a draft starting today and finishing by date today.
    pub fn new(today: NaiveDate, config: &ComposerConfig) -> Self {
        Self {
            goal_name: String::new(),
            today,
            start_mode: StartMode::Today,
            start_date: today,
            start_picker_visible: false,
            finish_mode: FinishMode::ByDate,
            finish_date: today,
            finish_picker_visible: false,
            duration_days: DurationStepper::new(config.default_duration_days),
            duration_months: DurationStepper::new(config.default_duration_months),
            dismissal: config.picker_dismissal,
        }
    }

    pub fn set_goal_name(&mut self, name: impl Into<String>) {
        self.goal_name = name.into();
    }

    pub fn goal_name(&self) -> &str {
        &self.goal_name
    }

    /// Whether the "continue" control is enabled.
    pub fn can_continue(&self) -> bool {
        !self.goal_name.trim().is_empty()
    }

    /// Switches the start tab.
    ///
    /// `Today` and `Tomorrow` set the date and hide the picker; `Custom`
    /// reveals the picker and keeps the current date until one is confirmed.
    pub fn select_start_mode(&mut self, mode: StartMode) {
        self.start_mode = mode;
        match mode {
            StartMode::Today => {
                self.set_start_date(self.today);
                self.start_picker_visible = false;
            }
            StartMode::Tomorrow => {
                self.set_start_date(self.today.checked_add_days(Days::new(1)).unwrap_or(self.today));
                self.start_picker_visible = false;
            }
            StartMode::Custom => self.start_picker_visible = true,
        }
        debug!(
            "event=schedule_start_mode module=schedule status=ok mode={}",
            mode.as_str()
        );
    }

    /// Applies a start-picker result. Dates before today are raised to today.
    pub fn confirm_start_date(&mut self, selected: Option<NaiveDate>) -> DateSelection {
        if self.start_mode != StartMode::Custom || !self.start_picker_visible {
            return DateSelection::Ignored;
        }
        self.start_picker_visible = self.dismissal == PickerDismissal::KeepOpen;

        let Some(date) = selected else {
            return DateSelection::Cancelled;
        };
        let selection = clamp_selection(date, self.today);
        self.set_start_date(selection_date(selection).unwrap_or(self.today));
        selection
    }

    /// Switches the finish tab. `ByDate` reveals the finish picker.
    pub fn select_finish_mode(&mut self, mode: FinishMode) {
        self.finish_mode = mode;
        self.finish_picker_visible = mode == FinishMode::ByDate;
        debug!(
            "event=schedule_finish_mode module=schedule status=ok mode={}",
            mode.as_str()
        );
    }

    /// Re-opens the finish picker from the date display box.
    pub fn open_finish_picker(&mut self) {
        if self.finish_mode == FinishMode::ByDate {
            self.finish_picker_visible = true;
        }
    }

    /// Applies a finish-picker result. Dates before the start are raised to it.
    pub fn confirm_finish_date(&mut self, selected: Option<NaiveDate>) -> DateSelection {
        if self.finish_mode != FinishMode::ByDate || !self.finish_picker_visible {
            return DateSelection::Ignored;
        }
        self.finish_picker_visible = self.dismissal == PickerDismissal::KeepOpen;

        let Some(date) = selected else {
            return DateSelection::Cancelled;
        };
        let selection = clamp_selection(date, self.start_date);
        self.finish_date = selection_date(selection).unwrap_or(self.start_date);
        selection
    }

    pub fn increment_days(&mut self) -> u32 {
        self.duration_days.increment()
    }

    pub fn decrement_days(&mut self) -> u32 {
        self.duration_days.decrement()
    }

    pub fn increment_months(&mut self) -> u32 {
        self.duration_months.increment()
    }

    pub fn decrement_months(&mut self) -> u32 {
        self.duration_months.decrement()
    }

    pub fn start_mode(&self) -> StartMode {
        self.start_mode
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn start_picker_visible(&self) -> bool {
        self.start_picker_visible
    }

    /// Earliest date the start picker may offer.
    pub fn start_minimum(&self) -> NaiveDate {
        self.today
    }

    pub fn finish_mode(&self) -> FinishMode {
        self.finish_mode
    }

    pub fn finish_date(&self) -> NaiveDate {
        self.finish_date
    }

    pub fn finish_picker_visible(&self) -> bool {
        self.finish_picker_visible
    }

    /// Earliest date the finish picker may offer.
    pub fn finish_minimum(&self) -> NaiveDate {
        self.start_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days.value()
    }

    pub fn duration_months(&self) -> u32 {
        self.duration_months.value()
    }

    /// Finish date implied by the active finish mode.
    ///
    /// Duration mode adds months first, then days, to the start date.
    pub fn resolved_finish_date(&self) -> NaiveDate {
        match self.finish_mode {
            FinishMode::ByDate => self.finish_date,
            FinishMode::ByDuration => self
                .start_date
                .checked_add_months(Months::new(self.duration_months.value()))
                .and_then(|date| {
                    date.checked_add_days(Days::new(u64::from(self.duration_days.value())))
                })
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Confirmed start/finish range.
    pub fn window(&self) -> GoalWindow {
        GoalWindow {
            start: self.start_date,
            finish: self.resolved_finish_date().max(self.start_date),
        }
    }

    fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;
        if self.finish_date < date {
            self.finish_date = date;
        }
    }
}

/// Renders a date as `DD/MM/YYYY`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn clamp_selection(date: NaiveDate, minimum: NaiveDate) -> DateSelection {
    if date < minimum {
        DateSelection::Clamped(minimum)
    } else {
        DateSelection::Applied(date)
    }
}

fn selection_date(selection: DateSelection) -> Option<NaiveDate> {
    match selection {
        DateSelection::Applied(date) | DateSelection::Clamped(date) => Some(date),
        DateSelection::Cancelled | DateSelection::Ignored => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{format_display_date, DurationStepper, FinishMode, StartMode};
    use chrono::NaiveDate;

    #[test]
    fn display_date_is_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 6).expect("valid date");
        assert_eq!(format_display_date(date), "06/02/2026");
    }

    #[test]
    fn stepper_holds_at_zero() {
        let mut stepper = DurationStepper::new(1);
        assert_eq!(stepper.decrement(), 0);
        assert_eq!(stepper.decrement(), 0);
        assert_eq!(stepper.increment(), 1);
    }

    #[test]
    fn mode_names_roundtrip() {
        for mode in [StartMode::Today, StartMode::Tomorrow, StartMode::Custom] {
            assert_eq!(StartMode::parse(mode.as_str()), Some(mode));
        }
        for mode in [FinishMode::ByDate, FinishMode::ByDuration] {
            assert_eq!(FinishMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(StartMode::parse("Tommorow"), None);
    }
}
