//! In-memory TTL cache implementation.

use super::service::{CacheResult, CacheService, Ttl};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

struct CacheEntry {
    value: Value,
    /// `None` means the entry never expires.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// Process-local cache over a `HashMap` guarded by a single `RwLock`.
///
/// Every operation holds the lock for the duration of one map access, so
/// each is atomic with respect to tasks interleaved at await points.
/// Expired entries are evicted lazily on read and in bulk by the sweeper
/// task spawned from [`run_sweeper`].
///
/// State is lost on restart by design; the upstream store stays
/// authoritative.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates an empty cache with the given default TTL for entries
    /// stored via [`Ttl::Default`].
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    fn deadline_for(&self, ttl: Ttl) -> Option<Instant> {
        match ttl {
            Ttl::Default => Some(Instant::now() + self.default_ttl),
            Ttl::Seconds(secs) => Some(Instant::now() + Duration::from_secs(secs)),
            Ttl::Never => None,
        }
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of physically stored entries, including not-yet-swept
    /// expired ones.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(Instant::now()) => {
                    debug!("Cache HIT: {}", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {} // expired, evict below
                None => {
                    debug!("Cache MISS: {}", key);
                    return Ok(None);
                }
            }
        }

        // Re-check under the write lock: another task may have replaced
        // the entry between the two lock acquisitions.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_expired(Instant::now()) {
                entries.remove(key);
                debug!("Cache EXPIRED: {}", key);
            } else {
                return Ok(Some(entry.value.clone()));
            }
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Value, ttl: Ttl) -> CacheResult<()> {
        let entry = CacheEntry {
            value,
            expires_at: self.deadline_for(ttl),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        debug!("Cache SET: {} ({:?})", key, ttl);
        Ok(())
    }

    async fn has(&self, key: &str) -> CacheResult<bool> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now())))
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some(entry) => Ok(!entry.is_expired(Instant::now())),
            None => Ok(false),
        }
    }

    async fn flush_all(&self) -> CacheResult<()> {
        self.entries.write().await.clear();
        info!("Cache flushed");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Periodically purges expired entries so long-idle keys do not pin
/// memory until the next read touches them.
///
/// Spawned from `server::run`; runs until the process exits.
pub async fn run_sweeper(cache: Arc<MemoryCache>, interval: Duration) {
    info!("Cache sweeper started (interval: {:?})", interval);
    loop {
        tokio::time::sleep(interval).await;
        let removed = cache.purge_expired().await;
        if removed > 0 {
            debug!("Cache sweep removed {} expired entries", removed);
        }
    }
}
