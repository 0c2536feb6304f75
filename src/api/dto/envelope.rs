//! JSON response envelope for the admin cache endpoints.

use serde::{Deserialize, Serialize};

/// `{ status, message }` body matching the upstream API's envelope
/// convention, so operators see one shape everywhere.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    pub message: String,
}

impl Envelope {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
