//! Background worker draining the view-count queue.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::upstream::UpstreamStore;
use crate::domain::view_event::ViewEvent;

/// Consumes view events and relays each to the upstream counter
/// endpoint.
///
/// The worker is the only consumer of view-increment results: failures
/// are logged and dropped, so a flaky upstream can never turn into a
/// user-visible redirect error. Ordering relative to the redirect
/// response is not guaranteed.
pub async fn run_view_worker(mut rx: mpsc::Receiver<ViewEvent>, store: Arc<dyn UpstreamStore>) {
    while let Some(event) = rx.recv().await {
        match store.count_view(&event.alias).await {
            Ok(()) => debug!(alias = %event.alias, "View counted"),
            Err(e) => warn!(
                alias = %event.alias,
                requested_at = %event.requested_at,
                error = %e,
                "Add view failed"
            ),
        }
    }
    debug!("View queue closed, worker exiting");
}
