//! Cross-screen handoff of newly scheduled task titles.
//!
//! The schedule screen only produces a title; the task-list screen stays the
//! sole authority for ids and capacity.

pub mod channel;
