//! Shared utilities: random identifier generation and date-range handling.

pub mod date_range;
pub mod key_generator;
