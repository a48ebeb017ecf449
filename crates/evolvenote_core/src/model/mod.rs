//! Domain model for goal composition.
//!
//! # Responsibility
//! - Define canonical data structures used by core composition logic.
//! - Keep tasks and finalized goals independent of any screen.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` unique for the draft lifetime.
//! - A finalized `Goal` always carries at least one task.

pub mod goal;
pub mod task;
