//! Redirect resolution: sanitize, cache lookup, fetch-on-miss.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::Link;
use crate::domain::upstream::{FetchOutcome, UpstreamStore};
use crate::infrastructure::cache::{CacheService, Ttl};
use crate::utils::sanitize::{SanitizedAlias, sanitize_alias};

/// Decision the HTTP layer turns into a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// 302 to the destination; `alias` is the canonical form, used by
    /// the handler to queue the view increment.
    Redirect { alias: String, destination: String },
    /// Render the details page for an `alias+` info request.
    Info(Link),
    /// Render the not-found page with 404.
    NotFound,
}

/// Resolves raw alias path segments into redirect decisions.
///
/// Read-through cache in front of the upstream link store. Every
/// failure mode of the upstream collapses into [`Resolution::NotFound`]:
/// the public redirect endpoint fails closed instead of propagating a
/// 500 for backend hiccups.
///
/// Concurrent misses for the same alias may both fetch and both
/// populate the cache; last writer wins. The cache is not the source of
/// truth, so no lock guards population.
pub struct LinkResolver {
    cache: Arc<dyn CacheService>,
    store: Arc<dyn UpstreamStore>,
}

impl LinkResolver {
    pub fn new(cache: Arc<dyn CacheService>, store: Arc<dyn UpstreamStore>) -> Self {
        Self { cache, store }
    }

    /// Runs the full pipeline for one request.
    pub async fn resolve(&self, raw_alias: &str) -> Resolution {
        let SanitizedAlias {
            alias,
            is_info_request,
        } = sanitize_alias(raw_alias);

        if alias.is_empty() {
            return Resolution::NotFound;
        }

        if is_info_request {
            return self.resolve_info(&alias).await;
        }

        let cache_key = format!("alias:{}", alias);

        if let Ok(Some(value)) = self.cache.get(&cache_key).await
            && let Some(destination) = destination_from_value(&value)
        {
            debug!(alias = %alias, "Resolved from cache");
            return Resolution::Redirect { alias, destination };
        }

        match self.store.fetch_link(&alias).await {
            FetchOutcome::Found(link) => {
                // Populated synchronously so a follow-up request within
                // the TTL window skips the upstream fetch.
                let _ = self
                    .cache
                    .set(
                        &cache_key,
                        Value::String(link.destination.clone()),
                        Ttl::Default,
                    )
                    .await;

                Resolution::Redirect {
                    alias,
                    destination: link.destination,
                }
            }
            FetchOutcome::NotFound => Resolution::NotFound,
            FetchOutcome::Malformed(raw) => {
                warn!(alias = %alias, payload = %raw, "Destination missing from upstream response");
                Resolution::NotFound
            }
            FetchOutcome::Unreachable(cause) => {
                warn!(alias = %alias, error = %cause, "Upstream unreachable, failing closed");
                Resolution::NotFound
            }
        }
    }

    /// The `alias+` details path: always asks the upstream, never
    /// touches the cache, never increments the view counter.
    async fn resolve_info(&self, alias: &str) -> Resolution {
        match self.store.fetch_link(alias).await {
            FetchOutcome::Found(link) => Resolution::Info(link),
            FetchOutcome::NotFound => Resolution::NotFound,
            FetchOutcome::Malformed(raw) => {
                warn!(alias = %alias, payload = %raw, "Destination missing from upstream response");
                Resolution::NotFound
            }
            FetchOutcome::Unreachable(cause) => {
                warn!(alias = %alias, error = %cause, "Upstream unreachable, failing closed");
                Resolution::NotFound
            }
        }
    }
}

/// Accepts both cached shapes: a bare destination string, or an
/// admin-seeded object carrying a `destination` field.
fn destination_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(destination) => Some(destination.clone()),
        Value::Object(map) => map
            .get("destination")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
