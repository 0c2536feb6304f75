//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the
//! server starts.
//!
//! ## Required Variables
//!
//! - `APP_SERVER_URL` - Base URL of the upstream link/post store
//! - `APP_SECRET_KEY` - Shared secret for the cache admin endpoints
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3001`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CACHE_TTL_SECONDS` - Default TTL for cached entries (default: 86400)
//! - `CACHE_SWEEP_INTERVAL` - Seconds between expiry sweeps (default: 600)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Per-request upstream timeout (default: 5)
//! - `VIEW_QUEUE_CAPACITY` - View event buffer size (default: 10000, min: 100)
//! - `VIEW_BYPASS_ALIAS` - Alias whose views are never counted
//!   (default: `testing-cache-app`; set empty to disable)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the authoritative link/post store.
    pub upstream_url: String,
    /// Shared secret checked by the cache admin endpoints.
    pub admin_secret: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Default TTL (seconds) applied to cache entries stored with
    /// `Ttl::Default`.
    pub cache_ttl_seconds: u64,
    /// Interval (seconds) between background sweeps of expired entries.
    pub cache_sweep_interval_seconds: u64,
    /// Connect and request timeout (seconds) for upstream calls. A
    /// timed-out fetch is treated like "not found", never a hang.
    pub upstream_timeout_seconds: u64,
    /// Maximum number of queued view-count events.
    pub view_queue_capacity: usize,
    /// Alias whose redirects never increment the view counter. Used by
    /// deployment smoke tests so they do not skew statistics.
    pub view_bypass_alias: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_SERVER_URL` or `APP_SECRET_KEY` is
    /// missing.
    pub fn from_env() -> Result<Self> {
        let upstream_url = env::var("APP_SERVER_URL").context("APP_SERVER_URL must be set")?;
        let admin_secret = env::var("APP_SECRET_KEY").context("APP_SECRET_KEY must be set")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let cache_sweep_interval_seconds = env::var("CACHE_SWEEP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(600);

        let upstream_timeout_seconds = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let view_queue_capacity = env::var("VIEW_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        // Unset means the default bypass alias; an explicitly empty
        // value disables bypassing altogether.
        let view_bypass_alias = match env::var("VIEW_BYPASS_ALIAS") {
            Ok(alias) if alias.is_empty() => None,
            Ok(alias) => Some(alias),
            Err(_) => Some("testing-cache-app".to_string()),
        };

        Ok(Self {
            upstream_url,
            admin_secret,
            listen_addr,
            log_level,
            log_format,
            cache_ttl_seconds,
            cache_sweep_interval_seconds,
            upstream_timeout_seconds,
            view_queue_capacity,
            view_bypass_alias,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `upstream_url` is not an http(s) URL
    /// - `admin_secret` is empty
    /// - `listen_addr` is not in `host:port` form
    /// - `cache_ttl_seconds` is zero
    /// - `view_queue_capacity` is outside `[100, 1000000]`
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            anyhow::bail!(
                "APP_SERVER_URL must start with 'http://' or 'https://', got '{}'",
                self.upstream_url
            );
        }

        if self.admin_secret.is_empty() {
            anyhow::bail!("APP_SECRET_KEY must not be empty");
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!("LISTEN must be in format 'host:port', got '{}'", self.listen_addr);
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than zero");
        }

        if self.view_queue_capacity < 100 {
            anyhow::bail!(
                "VIEW_QUEUE_CAPACITY must be at least 100, got {}",
                self.view_queue_capacity
            );
        }

        if self.view_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "VIEW_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.view_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }
}
