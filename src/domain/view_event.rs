//! View-count event dispatched on successful redirects.

use chrono::{DateTime, Utc};

/// A pending view increment for one alias.
///
/// Produced by the redirect handler with `try_send`: when the queue is
/// full the event is dropped rather than delaying the redirect.
#[derive(Debug, Clone)]
pub struct ViewEvent {
    pub alias: String,
    pub requested_at: DateTime<Utc>,
}

impl ViewEvent {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            requested_at: Utc::now(),
        }
    }
}
