//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{alias}`        - Shortlink redirect or `alias+` details (public)
//! - `GET /post/{hash_id}` - Rendered blog post (public)
//! - `GET /health`         - Health check: cache, view queue (public)
//! - `GET /cache/flush`    - Admin: flush the whole cache (secret-keyed)
//! - `GET /cache/{key}`    - Admin: delete one cache entry (secret-keyed)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the admin routes
//! - **Catch panic** - Renders the generic error page instead of a
//!   dropped connection
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    delete_cache_handler, flush_cache_handler, health_handler, post_handler, redirect_handler,
};
use crate::api::middleware::{rate_limit, tracing};
use crate::error::{AppError, panic_response};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, response::IntoResponse};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let admin_router = Router::new()
        .route("/flush", get(flush_cache_handler))
        .route("/{key}", get(delete_cache_handler))
        .layer(rate_limit::admin_layer());

    let router = Router::new()
        .route("/{alias}", get(redirect_handler))
        .route("/post/{hash_id}", get(post_handler))
        .route("/health", get(health_handler))
        .nest("/cache", admin_router)
        .fallback(not_found)
        .with_state(state)
        .layer(tracing::layer())
        .layer(CatchPanicLayer::custom(panic_response));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Unmatched routes render the not-found page.
async fn not_found() -> impl IntoResponse {
    AppError::not_found()
}
