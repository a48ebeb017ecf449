//! Navigation-scoped context for the goal composition flow.
//!
//! # Responsibility
//! - Track the screen stack (home, task list, schedule).
//! - Own the handoff slot so a carried title travels with its transition.
//!
//! # Invariants
//! - The stack is never empty; `back` on the root is a no-op.
//! - `return_with_title` publishes and transitions in one call.

use crate::handoff::channel::{HandoffChannel, NEW_GOAL_TITLE_KEY};
use log::{debug, info};

/// Screens participating in goal composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    TaskList,
    Schedule,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::TaskList => "task_list",
            Self::Schedule => "schedule",
        }
    }
}

/// Screen stack plus carried parameters.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
    handoff: HandoffChannel,
}

impl Navigator {
    /// Starts with `root` as the only screen.
    pub fn new(root: Route) -> Self {
        Self {
            stack: vec![root],
            handoff: HandoffChannel::new(),
        }
    }

    /// Screen currently on top.
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes a screen without parameters.
    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
        info!(
            "event=nav_push module=navigation status=ok route={} depth={}",
            route.as_str(),
            self.stack.len()
        );
    }

    /// Pops the top screen. Returns the new top, or `None` at the root.
    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            debug!("event=nav_back module=navigation status=skipped reason=at_root");
            return None;
        }
        let left = self.stack.pop();
        let current = self.current();
        info!(
            "event=nav_back module=navigation status=ok from={} to={}",
            left.map_or("none", Route::as_str),
            current.as_str()
        );
        Some(current)
    }

    /// Returns to `target` carrying `title` under [`NEW_GOAL_TITLE_KEY`].
    ///
    /// Screens above the nearest `target` are popped; when `target` is not on
    /// the stack it is pushed. The payload is published as part of the same
    /// transition.
    pub fn return_with_title(&mut self, target: Route, title: impl Into<String>) {
        match self.stack.iter().rposition(|route| *route == target) {
            Some(index) => self.stack.truncate(index + 1),
            None => self.stack.push(target),
        }
        self.handoff.publish(title);
        info!(
            "event=nav_return module=navigation status=ok route={} param={} depth={}",
            target.as_str(),
            NEW_GOAL_TITLE_KEY,
            self.stack.len()
        );
    }

    /// Drops a carried parameter that was not consumed.
    pub fn clear_param(&mut self) {
        self.handoff.clear();
    }

    pub fn handoff(&self) -> &HandoffChannel {
        &self.handoff
    }

    pub fn handoff_mut(&mut self) -> &mut HandoffChannel {
        &mut self.handoff
    }
}
