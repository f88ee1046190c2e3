//! HTTP client setup and middleware configuration.
//!
//! This module builds the `reqwest` clients used by the default transport.
//! Each client is wrapped in `reqwest-middleware` with request tracing and,
//! when asked for, transient-failure retries.
//!
//! # Examples
//!
//! ```rust
//! use interpose::http::{create_http_client, HttpClientConfig};
//! use reqwest::redirect::Policy;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::default();
//! let client = create_http_client(&config, Policy::default())?;
//! # Ok(())
//! # }
//! ```

use reqwest::{redirect::Policy, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Configuration for the default transport's HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Transport-level retries for transient failures. Zero disables the
    /// retry middleware.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
}

/// Creates an HTTP client with middleware configuration.
///
/// This function sets up a reqwest client with:
/// - Tracing middleware for request/response logging
/// - Retry middleware with exponential backoff, when `retries` is non-zero
/// - Optional proxy support
/// - The given redirect policy
pub fn create_http_client(
    config: &HttpClientConfig,
    redirect: Policy,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder().redirect(redirect);

    if let Some(proxy) = config.proxy.clone() {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    let inner_client = inner_client_builder.build()?;

    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let mut builder = ClientBuilder::new(inner_client).with(TracingMiddleware::default());

    if config.retries > 0 {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }

    Ok(builder.build())
}
