//! Post resolution: the simpler variant of the read-through cache.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::Post;
use crate::domain::upstream::{FetchOutcome, UpstreamStore};
use crate::infrastructure::cache::{CacheService, Ttl};

/// Resolves post hash ids through the cache.
///
/// No sanitizer step (the hash id is opaque and validated upstream) and
/// no view increment. Cached value is the whole serialized [`Post`]
/// under `post:<hash_id>`.
pub struct PostResolver {
    cache: Arc<dyn CacheService>,
    store: Arc<dyn UpstreamStore>,
}

impl PostResolver {
    pub fn new(cache: Arc<dyn CacheService>, store: Arc<dyn UpstreamStore>) -> Self {
        Self { cache, store }
    }

    /// Returns the post, or `None` for every failure mode (absent,
    /// malformed, upstream unreachable).
    pub async fn resolve(&self, hash_id: &str) -> Option<Post> {
        let cache_key = format!("post:{}", hash_id);

        if let Ok(Some(value)) = self.cache.get(&cache_key).await {
            match serde_json::from_value::<Post>(value) {
                Ok(post) => {
                    debug!(hash_id = %hash_id, "Post resolved from cache");
                    return Some(post);
                }
                // An undecodable cached value falls through to a fresh
                // fetch which overwrites it.
                Err(e) => warn!(hash_id = %hash_id, error = %e, "Undecodable cached post"),
            }
        }

        match self.store.fetch_post(hash_id).await {
            FetchOutcome::Found(post) => {
                if let Ok(value) = serde_json::to_value(&post) {
                    let _ = self.cache.set(&cache_key, value, Ttl::Default).await;
                }
                Some(post)
            }
            FetchOutcome::NotFound => None,
            FetchOutcome::Malformed(raw) => {
                warn!(hash_id = %hash_id, payload = %raw, "Post missing from upstream response");
                None
            }
            FetchOutcome::Unreachable(cause) => {
                warn!(hash_id = %hash_id, error = %cause, "Upstream unreachable, failing closed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upstream::MockUpstreamStore;
    use crate::infrastructure::cache::MemoryCache;
    use chrono::Utc;
    use std::time::Duration;

    fn post(hash_id: &str) -> Post {
        Post {
            id: 42,
            hash_id: hash_id.to_string(),
            title: "Hello".to_string(),
            content: "<p>world</p>".to_string(),
            status: "published".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn resolver(store: MockUpstreamStore) -> (PostResolver, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new(Duration::from_secs(86400)));
        (
            PostResolver::new(cache.clone(), Arc::new(store)),
            cache,
        )
    }

    #[tokio::test]
    async fn miss_fetches_and_caches_the_record() {
        let mut store = MockUpstreamStore::new();
        store
            .expect_fetch_post()
            .withf(|hash_id| hash_id == "aZb9")
            .times(1)
            .returning(|hash_id| FetchOutcome::Found(post(hash_id)));

        let (resolver, cache) = resolver(store);

        let first = resolver.resolve("aZb9").await.expect("post");
        assert_eq!(first.title, "Hello");
        assert!(cache.has("post:aZb9").await.unwrap());

        // Served from cache; the mock allows exactly one fetch.
        let second = resolver.resolve("aZb9").await.expect("post");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn absent_post_resolves_to_none_without_caching() {
        let mut store = MockUpstreamStore::new();
        store
            .expect_fetch_post()
            .times(1)
            .returning(|_| FetchOutcome::NotFound);

        let (resolver, cache) = resolver(store);

        assert!(resolver.resolve("nope").await.is_none());
        assert!(!cache.has("post:nope").await.unwrap());
    }

    #[tokio::test]
    async fn undecodable_cached_value_is_refetched() {
        let mut store = MockUpstreamStore::new();
        store
            .expect_fetch_post()
            .times(1)
            .returning(|hash_id| FetchOutcome::Found(post(hash_id)));

        let (resolver, cache) = resolver(store);
        cache
            .set("post:aZb9", serde_json::json!("garbage"), Ttl::Default)
            .await
            .unwrap();

        assert!(resolver.resolve("aZb9").await.is_some());
    }
}
