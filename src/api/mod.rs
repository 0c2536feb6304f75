//! HTTP layer: handlers, DTOs, middleware, and the route table.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
