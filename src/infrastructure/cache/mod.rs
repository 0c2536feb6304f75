//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with an in-memory, TTL-based
//! implementation ([`MemoryCache`]). Keys are namespaced by the callers:
//! `alias:<alias>` for link destinations, `post:<hash_id>` for posts.

mod memory_cache;
mod service;

pub use memory_cache::{MemoryCache, run_sweeper};
pub use service::{CacheError, CacheResult, CacheService, Ttl};
