//! Pure helper functions shared across layers.

pub mod sanitize;
