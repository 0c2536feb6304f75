//! HTTP client for the upstream link/post store.

mod http_store;

pub use http_store::HttpUpstreamStore;
