//! Cache service trait and error types.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Expiry policy for a single `set` call.
///
/// Callers must state their intent explicitly; a missing TTL is never
/// silently interpreted one way or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Use the cache-wide default (86400 seconds unless configured).
    Default,
    /// Expire this entry after the given number of seconds.
    Seconds(u64),
    /// Keep the entry until it is deleted or the cache is flushed.
    Never,
}

/// Trait for the process-local key-value cache in front of the upstream
/// link/post store.
///
/// Implementations must be thread-safe and fail open: a broken cache
/// degrades to upstream fetches, it never takes a request down with it.
/// Cache contents are not authoritative; the upstream store is.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a value by key.
    ///
    /// Returns `Ok(None)` if the key was never set, was deleted, or its
    /// TTL has elapsed. Reading an expired entry behaves exactly like a
    /// miss; implementations may evict it lazily at that point.
    async fn get(&self, key: &str) -> CacheResult<Option<Value>>;

    /// Inserts or overwrites a value, restarting the TTL countdown from
    /// the time of the call.
    async fn set(&self, key: &str, value: Value, ttl: Ttl) -> CacheResult<()>;

    /// True iff a subsequent [`get`](Self::get) would return a value.
    async fn has(&self, key: &str) -> CacheResult<bool>;

    /// Removes an entry. Returns `true` iff a live (non-expired) entry
    /// existed and was removed.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Atomically empties the cache. Concurrent readers observe either
    /// the pre-flush or the post-flush state, never a partial one.
    async fn flush_all(&self) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health check endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
