//! Key-protected cache administration endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::dto::envelope::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminKeyQuery {
    /// Shared admin secret passed as `?key=`.
    pub key: Option<String>,
}

/// Clears the entire cache.
///
/// # Endpoint
///
/// `GET /cache/flush?key=<secret>`
///
/// Requires an exact match of the shared secret in the query string;
/// unlike single-key deletion there is no header-based bypass here.
/// Responds 401 `"Access denied, wrong key"` on mismatch, 200
/// `"Successfully cleared all cache"` on success.
pub async fn flush_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<AdminKeyQuery>,
) -> (StatusCode, Json<Envelope>) {
    if query.key.as_deref() != Some(state.admin_secret.as_str()) {
        warn!("Cache flush denied");
        return (
            StatusCode::UNAUTHORIZED,
            Json(Envelope::new(401, "Access denied, wrong key")),
        );
    }

    if let Err(e) = state.cache.flush_all().await {
        warn!("Cache flush failed: {}", e);
    }
    info!("Cache flushed by admin");

    (
        StatusCode::OK,
        Json(Envelope::new(200, "Successfully cleared all cache")),
    )
}

/// Deletes a single cache entry by its full key (prefix included).
///
/// # Endpoint
///
/// `GET /cache/{key}?key=<secret>` or with an `Authorization` header
///
/// # Authorization
///
/// Either the correct shared secret in the query string, or the mere
/// presence of an `Authorization` header. The header's value is not
/// verified; this mirrors the upstream deployment where the reverse
/// proxy has already checked it. Weaker than the flush check on
/// purpose, see DESIGN.md.
///
/// Deleting a key that is not cached is not an error: it responds 200
/// with `"No cache <key>"`.
pub async fn delete_cache_handler(
    Path(cache_key): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<AdminKeyQuery>,
    headers: HeaderMap,
) -> (StatusCode, Json<Envelope>) {
    let secret_matches = query.key.as_deref() == Some(state.admin_secret.as_str());
    let has_auth_header = headers.contains_key(header::AUTHORIZATION);

    if !secret_matches && !has_auth_header {
        warn!(key = %cache_key, "Cache delete denied");
        return (
            StatusCode::UNAUTHORIZED,
            Json(Envelope::new(401, "Access denied, wrong key or no auth")),
        );
    }

    let message = if state.cache.delete(&cache_key).await.unwrap_or(false) {
        info!(key = %cache_key, "Cache entry deleted by admin");
        format!("Successfully delete cache {}", cache_key)
    } else {
        format!("No cache {}", cache_key)
    };

    (StatusCode::OK, Json(Envelope::new(200, message)))
}
