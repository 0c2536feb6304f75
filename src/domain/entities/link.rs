//! Link entity as served by the upstream link store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved shortlink record.
///
/// Transient value: the redirect service never persists links, it only
/// caches the `destination` under `alias:<alias>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub id: i64,
    pub alias: String,
    /// Destination URL. Validated to parse as a URL when fetched; an
    /// upstream record without a usable destination is treated as
    /// malformed, not as a server error.
    pub destination: String,
    /// Lifetime view counter, owned by the upstream store.
    pub view: i64,
    pub created_at: DateTime<Utc>,
}
