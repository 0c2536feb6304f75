//! # Shortlink Redirector
//!
//! Public-facing redirect front-end for a URL shortener, built with
//! Axum. Sits in front of the authoritative link/post store and serves
//! redirects out of a process-local TTL cache.
//!
//! ## Architecture
//!
//! Layered the usual way:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the upstream store
//!   contract, and the view-count pipeline
//! - **Application Layer** ([`application`]) - Resolver services
//!   (sanitize, cache lookup, fetch-on-miss, respond decision)
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory TTL
//!   cache and the reqwest upstream client
//! - **API Layer** ([`api`]) - Handlers, DTOs, middleware, routes
//!
//! ## Features
//!
//! - Read-through destination cache with lazy and swept expiry
//! - `alias+` info pages that always reflect the authoritative store
//! - Fire-and-forget view counting over a bounded queue
//! - Secret-keyed cache administration (flush, single-key delete)
//!
//! ## Quick Start
//!
//! ```bash
//! export APP_SERVER_URL="http://localhost:3000"
//! export APP_SECRET_KEY="change-me"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod server;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library
/// users and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkResolver, PostResolver, Resolution};
    pub use crate::domain::entities::{Link, Post};
    pub use crate::domain::upstream::{FetchOutcome, UpstreamError, UpstreamStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, MemoryCache, Ttl};
    pub use crate::state::AppState;
}
