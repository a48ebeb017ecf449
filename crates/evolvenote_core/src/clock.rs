//! Time source abstraction.
//!
//! Schedule rules compare against "today"; tests swap in [`FixedClock`] to
//! make those comparisons deterministic.

use chrono::{Local, NaiveDate, Utc};

/// Provides the current calendar day and wall-clock instant.
pub trait Clock {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;

    /// Current instant as Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_epoch_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at one day and instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub today: NaiveDate,
    pub now_epoch_ms: i64,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            now_epoch_ms: 1_700_000_000_000,
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_epoch_ms(&self) -> i64 {
        self.now_epoch_ms
    }
}
