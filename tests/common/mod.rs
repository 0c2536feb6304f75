#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

use shortlink_redirector::application::services::{LinkResolver, PostResolver};
use shortlink_redirector::domain::view_event::ViewEvent;
use shortlink_redirector::domain::entities::{Link, Post};
use shortlink_redirector::domain::upstream::{FetchOutcome, UpstreamError, UpstreamStore};
use shortlink_redirector::infrastructure::cache::{CacheService, MemoryCache};
use shortlink_redirector::state::AppState;

pub const TEST_SECRET: &str = "test-secret-key";

/// Scriptable upstream store that counts every call, so tests can
/// assert that cached requests never re-fetch.
#[derive(Default)]
pub struct StubStore {
    links: HashMap<String, Link>,
    posts: HashMap<String, Post>,
    malformed_aliases: HashSet<String>,
    unreachable: bool,
    pub link_fetches: AtomicUsize,
    pub post_fetches: AtomicUsize,
    pub view_counts: AtomicUsize,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, alias: &str, destination: &str) -> Self {
        self.links.insert(
            alias.to_string(),
            Link {
                id: self.links.len() as i64 + 1,
                alias: alias.to_string(),
                destination: destination.to_string(),
                view: 3,
                created_at: Utc::now(),
            },
        );
        self
    }

    pub fn with_post(mut self, hash_id: &str, title: &str, content: &str) -> Self {
        self.posts.insert(
            hash_id.to_string(),
            Post {
                id: self.posts.len() as i64 + 1,
                hash_id: hash_id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                status: "published".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        self
    }

    /// Marks an alias whose fetch yields a success envelope without a
    /// usable destination.
    pub fn with_malformed(mut self, alias: &str) -> Self {
        self.malformed_aliases.insert(alias.to_string());
        self
    }

    /// Makes every fetch fail at the transport level.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn link_fetch_count(&self) -> usize {
        self.link_fetches.load(Ordering::SeqCst)
    }

    pub fn post_fetch_count(&self) -> usize {
        self.post_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamStore for StubStore {
    async fn fetch_link(&self, alias: &str) -> FetchOutcome<Link> {
        self.link_fetches.fetch_add(1, Ordering::SeqCst);

        if self.unreachable {
            return FetchOutcome::Unreachable("connection refused".to_string());
        }
        if self.malformed_aliases.contains(alias) {
            return FetchOutcome::Malformed(serde_json::json!({ "status": 200, "data": {} }));
        }
        match self.links.get(alias) {
            Some(link) => FetchOutcome::Found(link.clone()),
            None => FetchOutcome::NotFound,
        }
    }

    async fn count_view(&self, _alias: &str) -> Result<(), UpstreamError> {
        self.view_counts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_post(&self, hash_id: &str) -> FetchOutcome<Post> {
        self.post_fetches.fetch_add(1, Ordering::SeqCst);

        if self.unreachable {
            return FetchOutcome::Unreachable("connection refused".to_string());
        }
        match self.posts.get(hash_id) {
            Some(post) => FetchOutcome::Found(post.clone()),
            None => FetchOutcome::NotFound,
        }
    }
}

/// Builds an [`AppState`] around the stub store, handing back the view
/// queue receiver and the concrete cache for assertions.
pub fn create_test_state(
    store: Arc<StubStore>,
) -> (AppState, mpsc::Receiver<ViewEvent>, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new(Duration::from_secs(86_400)));
    let cache_dyn: Arc<dyn CacheService> = cache.clone();

    let (view_tx, view_rx) = mpsc::channel(100);

    let link_resolver = Arc::new(LinkResolver::new(cache_dyn.clone(), store.clone()));
    let post_resolver = Arc::new(PostResolver::new(cache_dyn.clone(), store));

    let state = AppState::new(
        link_resolver,
        post_resolver,
        cache_dyn,
        view_tx,
        TEST_SECRET.to_string(),
        Some("testing-cache-app".to_string()),
    );

    (state, view_rx, cache)
}
