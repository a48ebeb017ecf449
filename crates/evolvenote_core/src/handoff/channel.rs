//! Single-slot, one-shot transfer of a new task title between screens.
//!
//! # Responsibility
//! - Carry one title from the schedule screen to the task-list screen.
//! - Guarantee each published title is acted on at most once.
//!
//! # Invariants
//! - Observing a present payload clears it in the same call (`take`).
//! - Every `publish` bumps `generation`; observers only act on a new generation.
//! - Empty titles are treated as absent.

use log::{debug, info};

/// Stable key under which the payload travels with the navigation transition.
pub const NEW_GOAL_TITLE_KEY: &str = "newGoalTitle";

/// Shared slot holding at most one pending title.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HandoffChannel {
    slot: Option<String>,
    generation: u64,
}

impl HandoffChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `title` as the pending payload, replacing any unconsumed one.
    pub fn publish(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.generation = self.generation.wrapping_add(1);
        if self.slot.is_some() {
            debug!(
                "event=handoff_publish module=handoff status=ok replaced_pending=true generation={}",
                self.generation
            );
        }
        self.slot = Some(title);
        info!(
            "event=handoff_publish module=handoff status=ok generation={}",
            self.generation
        );
    }

    /// Observes and clears the payload in one step.
    ///
    /// Returns `None` when the slot is absent or holds an empty title; the
    /// slot is empty afterwards either way.
    pub fn take(&mut self) -> Option<String> {
        self.slot.take().filter(|title| !title.is_empty())
    }

    /// Clears the payload without acting on it.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Whether a non-empty payload is waiting.
    pub fn is_pending(&self) -> bool {
        self.slot.as_deref().is_some_and(|title| !title.is_empty())
    }

    /// Monotonic publish counter used for edge detection.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Edge-triggered reader of a `HandoffChannel`.
///
/// Re-running `poll` on every render is safe: a generation already seen is
/// never acted on twice, even if its payload were somehow still present.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HandoffObserver {
    last_seen: u64,
}

impl HandoffObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the payload when the channel changed since the last poll.
    pub fn poll(&mut self, channel: &mut HandoffChannel) -> Option<String> {
        if channel.generation() == self.last_seen {
            return None;
        }
        self.last_seen = channel.generation();
        let title = channel.take();
        debug!(
            "event=handoff_consume module=handoff status={} generation={}",
            if title.is_some() { "ok" } else { "skipped" },
            self.last_seen
        );
        title
    }
}
