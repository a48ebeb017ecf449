//! Goal schedule model for the scheduling screen.

pub mod draft;
