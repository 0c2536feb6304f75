//! Post entity as served by the upstream blog store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post, cached verbatim under `post:<hash_id>`.
///
/// The hash id is an opaque, reversible encoding of the numeric post id;
/// this service never decodes it, the upstream store validates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    pub hash_id: String,
    pub title: String,
    /// Pre-rendered HTML body, inserted into the post template as-is.
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
