//! Core domain types: entities, the upstream store contract, and the
//! view-count pipeline.

pub mod entities;
pub mod upstream;
pub mod view_event;
pub mod view_worker;
