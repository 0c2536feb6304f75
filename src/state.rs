//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkResolver, PostResolver};
use crate::domain::view_event::ViewEvent;
use crate::infrastructure::cache::CacheService;

/// Handle to every long-lived component, cloned per request.
///
/// The cache instance is owned by the process entry point and shared
/// here by reference; handlers and resolvers never manage its
/// lifecycle.
#[derive(Clone)]
pub struct AppState {
    pub link_resolver: Arc<LinkResolver>,
    pub post_resolver: Arc<PostResolver>,
    /// Same cache the resolvers use; the admin endpoints address it
    /// directly by key.
    pub cache: Arc<dyn CacheService>,
    /// Producer side of the view-count queue.
    pub view_sender: mpsc::Sender<ViewEvent>,
    pub admin_secret: String,
    /// Alias whose redirects are never counted.
    pub view_bypass_alias: Option<String>,
}

impl AppState {
    pub fn new(
        link_resolver: Arc<LinkResolver>,
        post_resolver: Arc<PostResolver>,
        cache: Arc<dyn CacheService>,
        view_sender: mpsc::Sender<ViewEvent>,
        admin_secret: String,
        view_bypass_alias: Option<String>,
    ) -> Self {
        Self {
            link_resolver,
            post_resolver,
            cache,
            view_sender,
            admin_secret,
            view_bypass_alias,
        }
    }
}
