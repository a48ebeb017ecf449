//! Aggregate progress figures for the home screen.
//!
//! # Invariants
//! - `days_completed + days_left == total_days`.
//! - `percent` stays within `0..=100`.

use crate::model::goal::GoalWindow;
use chrono::NaiveDate;

/// Elapsed/remaining view of one goal window on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub total_days: u32,
    pub days_completed: u32,
    pub days_left: u32,
    pub percent: u8,
}

impl GoalProgress {
    /// Computes progress of `window` as seen on `today`.
    ///
    /// A zero-length window counts as complete once its start day is reached.
    pub fn compute(window: GoalWindow, today: NaiveDate) -> Self {
        let total = window.total_days().max(0);
        let elapsed = (today - window.start).num_days().clamp(0, total);

        let percent = if total == 0 {
            if today >= window.start {
                100
            } else {
                0
            }
        } else {
            // Nearest whole percent, halves rounded up.
            (elapsed * 200 + total) / (2 * total)
        };

        Self {
            total_days: to_u32(total),
            days_completed: to_u32(elapsed),
            days_left: to_u32(total - elapsed),
            percent: u8::try_from(percent.clamp(0, 100)).unwrap_or(100),
        }
    }
}

/// Count of created goals against the tier limit ("1/3 GOALS").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalQuota {
    pub used: usize,
    pub limit: usize,
}

impl GoalQuota {
    pub fn is_full(&self) -> bool {
        self.used >= self.limit
    }

    /// Badge label in `used/limit` form.
    pub fn label(&self) -> String {
        format!("{}/{}", self.used, self.limit)
    }
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
