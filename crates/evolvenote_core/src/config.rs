//! Composition session configuration.
//!
//! # Responsibility
//! - Hold the tier capacity and schedule defaults used by a session.
//! - Model the platform date-picker dismissal convention.

/// Task cap applied by the free tier.
pub const FREE_TIER_TASK_CAPACITY: usize = 3;
/// Initial duration in days shown by the schedule screen.
pub const DEFAULT_DURATION_DAYS: u32 = 90;
/// Initial duration in months shown by the schedule screen.
pub const DEFAULT_DURATION_MONTHS: u32 = 0;

/// What a date picker does after the user confirms a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerDismissal {
    /// Picker closes on confirm (Android dialog style).
    AutoHide,
    /// Picker stays visible after confirm (iOS inline style).
    KeepOpen,
}

impl PickerDismissal {
    /// Resolves the convention from a platform name (`ios`, `android`, ...).
    pub fn for_platform(platform: &str) -> Self {
        match platform.trim().to_ascii_lowercase().as_str() {
            "ios" => Self::KeepOpen,
            _ => Self::AutoHide,
        }
    }
}

/// Settings for one goal composition session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Maximum task count in a draft. Zero disables additions entirely.
    pub task_capacity: usize,
    pub default_duration_days: u32,
    pub default_duration_months: u32,
    pub picker_dismissal: PickerDismissal,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            task_capacity: FREE_TIER_TASK_CAPACITY,
            default_duration_days: DEFAULT_DURATION_DAYS,
            default_duration_months: DEFAULT_DURATION_MONTHS,
            picker_dismissal: PickerDismissal::AutoHide,
        }
    }
}

impl ComposerConfig {
    /// Returns a copy with a different task capacity.
    pub fn with_task_capacity(mut self, task_capacity: usize) -> Self {
        self.task_capacity = task_capacity;
        self
    }

    /// Returns a copy with a different picker dismissal convention.
    pub fn with_picker_dismissal(mut self, picker_dismissal: PickerDismissal) -> Self {
        self.picker_dismissal = picker_dismissal;
        self
    }
}
