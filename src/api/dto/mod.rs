//! Data transfer objects for the JSON endpoints.

pub mod envelope;
pub mod health;
