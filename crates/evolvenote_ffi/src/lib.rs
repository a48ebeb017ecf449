//! Flutter-facing bridge crate for EvolveNote core.

pub mod api;
