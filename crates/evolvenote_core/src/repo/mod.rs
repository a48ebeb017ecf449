//! Repository layer for finalized goals.
//!
//! # Responsibility
//! - Define the data access contract used by goal-creation callers.
//! - Isolate SQLite query details from composition logic.
//!
//! # Invariants
//! - Repository writes enforce `Goal::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) alongside DB errors.

pub mod goal_repo;
