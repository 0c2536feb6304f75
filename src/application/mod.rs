//! Application layer: resolver services.

pub mod services;
