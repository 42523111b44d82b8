//! Application layer - services implementing the use cases.

pub mod services;
