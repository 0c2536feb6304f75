//! HTTP implementation of the upstream store contract.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::domain::entities::{Link, Post};
use crate::domain::upstream::{FetchOutcome, UpstreamError, UpstreamStore};

/// JSON envelope wrapping every upstream response:
/// `{ status, message?, data? }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
struct UpstreamEnvelope<T> {
    #[allow(dead_code)]
    status: u16,
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<Value>,
    #[serde(default)]
    data: Option<T>,
}

/// Reqwest-backed client for the upstream link/post store.
///
/// The store signals "not found" with HTTP 400 on its read endpoints;
/// everything else the client classifies per [`FetchOutcome`]. All
/// requests share one pooled client with a conservative timeout so a
/// slow upstream delays at most the one request that hit it.
pub struct HttpUpstreamStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUpstreamStore {
    /// Builds the client against a base URL like `http://localhost:3000`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Runs one read request and classifies the response.
    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> FetchOutcome<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Upstream GET {}", url);

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return FetchOutcome::Unreachable(e.to_string()),
        };

        // The link store models "not found" as HTTP 400.
        if response.status() == StatusCode::BAD_REQUEST {
            return FetchOutcome::NotFound;
        }

        let raw: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => return FetchOutcome::Unreachable(e.to_string()),
        };

        match serde_json::from_value::<UpstreamEnvelope<T>>(raw.clone()) {
            Ok(UpstreamEnvelope {
                data: Some(record), ..
            }) => FetchOutcome::Found(record),
            _ => FetchOutcome::Malformed(raw),
        }
    }
}

#[async_trait]
impl UpstreamStore for HttpUpstreamStore {
    async fn fetch_link(&self, alias: &str) -> FetchOutcome<Link> {
        match self.fetch::<Link>(&format!("/link/{}", alias)).await {
            // A record without a parseable destination is as unusable as
            // a missing one.
            FetchOutcome::Found(link) if Url::parse(&link.destination).is_err() => {
                FetchOutcome::Malformed(
                    serde_json::to_value(&link).unwrap_or(Value::Null),
                )
            }
            outcome => outcome,
        }
    }

    async fn count_view(&self, alias: &str) -> Result<(), UpstreamError> {
        let url = format!("{}/link/{}/count", self.base_url, alias);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    async fn fetch_post(&self, hash_id: &str) -> FetchOutcome<Post> {
        self.fetch(&format!("/post/{}", hash_id)).await
    }
}
