//! Read-only client contract for the authoritative link/post store.

use crate::domain::entities::{Link, Post};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use thiserror::Error;

/// Outcome of a single upstream fetch.
///
/// The four cases are deliberately explicit so resolvers match on them
/// exhaustively instead of probing optional fields:
///
/// - `Found` — a well-formed record.
/// - `NotFound` — the store answered and the key does not exist
///   (expected traffic, not logged as anomalous).
/// - `Malformed` — a success response whose payload is unusable; carries
///   the raw body for the warning log. Treated as not-found downstream.
/// - `Unreachable` — transport failure, timeout, or a non-JSON body.
///   The read path fails closed and answers not-found rather than 500.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Found(T),
    NotFound,
    Malformed(Value),
    Unreachable(String),
}

/// Errors from the view-increment call.
///
/// Never surfaces to a response; the view worker only logs these.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Status(u16),
}

/// Read endpoints of the upstream link/post store.
///
/// The redirect service consumes the store exclusively through this
/// trait; the HTTP implementation lives in
/// [`crate::infrastructure::upstream::HttpUpstreamStore`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UpstreamStore: Send + Sync {
    /// Fetches the link record for an alias.
    async fn fetch_link(&self, alias: &str) -> FetchOutcome<Link>;

    /// Increments the view counter for an alias.
    ///
    /// Fire-and-forget from the caller's perspective: any non-200
    /// result is an error that gets logged and swallowed.
    async fn count_view(&self, alias: &str) -> Result<(), UpstreamError>;

    /// Fetches the post record for a hash id.
    async fn fetch_post(&self, hash_id: &str) -> FetchOutcome<Post>;
}
