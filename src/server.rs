//! HTTP server initialization and runtime setup.
//!
//! Handles cache construction, worker spawning, and Axum server
//! lifecycle.

use crate::api::routes::app_router;
use crate::application::services::{LinkResolver, PostResolver};
use crate::config::Config;
use crate::domain::upstream::UpstreamStore;
use crate::domain::view_worker::run_view_worker;
use crate::infrastructure::cache::{CacheService, MemoryCache, run_sweeper};
use crate::infrastructure::upstream::HttpUpstreamStore;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory cache plus its expiry sweeper
/// - Upstream HTTP client
/// - Background view-count worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the upstream client cannot be built, the listen
/// address is invalid, the bind fails, or the server hits a runtime
/// error.
pub async fn run(config: Config) -> Result<()> {
    let memory_cache = Arc::new(MemoryCache::new(Duration::from_secs(config.cache_ttl_seconds)));
    tokio::spawn(run_sweeper(
        memory_cache.clone(),
        Duration::from_secs(config.cache_sweep_interval_seconds),
    ));
    let cache: Arc<dyn CacheService> = memory_cache;
    tracing::info!(
        "Cache ready (TTL {}s, sweep every {}s)",
        config.cache_ttl_seconds,
        config.cache_sweep_interval_seconds
    );

    let store: Arc<dyn UpstreamStore> = Arc::new(HttpUpstreamStore::new(
        &config.upstream_url,
        Duration::from_secs(config.upstream_timeout_seconds),
    )?);
    tracing::info!("Upstream store at {}", config.upstream_url);

    let (view_tx, view_rx) = mpsc::channel(config.view_queue_capacity);
    tokio::spawn(run_view_worker(view_rx, store.clone()));
    tracing::info!("View worker started");

    let link_resolver = Arc::new(LinkResolver::new(cache.clone(), store.clone()));
    let post_resolver = Arc::new(PostResolver::new(cache.clone(), store));

    let state = AppState::new(
        link_resolver,
        post_resolver,
        cache,
        view_tx,
        config.admin_secret.clone(),
        config.view_bypass_alias.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves on Ctrl-C; in-flight requests drain before the process
/// exits. View events still sitting in the queue are dropped, view
/// counting is best-effort.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
