//! Infrastructure layer: cache backend and upstream HTTP client.

pub mod cache;
pub mod upstream;
