//! Client-wide defaults.
//!
//! A [`ClientConfig`] is captured when the [`Client`](super::Client) is built
//! and is only read afterwards. Every call merges its own options over it.

use crate::http::HttpClientConfig;

use reqwest::header::HeaderMap;

/// Configuration shared by every call of a client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL relative paths are resolved against.
    pub base_url: Option<String>,
    /// Headers sent with every request unless a call overrides them.
    pub headers: HeaderMap,
    /// Settings for the default transport.
    pub http: HttpClientConfig,
}
