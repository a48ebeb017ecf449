//! Goal draft state owned by the task-list screen.

pub mod store;
