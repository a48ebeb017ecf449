//! Goal composition session orchestration.
//!
//! # Responsibility
//! - Run the list → schedule → list flow on top of the core components.
//! - Keep UI/FFI layers free of handoff bookkeeping.

pub mod composer;
