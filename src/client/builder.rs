//! Builder pattern implementation for creating Client instances.
//!
//! # Examples
//!
//! ```rust
//! use interpose::client::ClientBuilder;
//! use reqwest::header::{HeaderValue, ACCEPT};
//!
//! # fn example() -> interpose::Result<()> {
//! let client = ClientBuilder::new()
//!     .base_url("https://api.example.com/v1")
//!     .header(ACCEPT, HeaderValue::from_static("application/json"))
//!     .build()?;
//!
//! assert_eq!(client.base_url(), Some("https://api.example.com/v1"));
//! # Ok(())
//! # }
//! ```

use super::{client::Client, config::ClientConfig};
use crate::error::Result;
use crate::http::{ReqwestTransport, Transport};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::sync::Arc;

/// A builder used to create a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        ClientBuilder::default()
    }

    /// Sets the base URL relative paths are resolved against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Add the default http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one, later values replacing earlier ones.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.config.headers.extend(headers);
        self
    }

    /// Add a default http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.config.headers.insert(name, value);
        self
    }

    /// Set the number of transport-level retries of the default transport.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.http.retries = retries;
        self
    }

    /// Route the default transport through a proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.http.proxy = Some(proxy);
        self
    }

    /// Use a custom transport instead of the default `reqwest` one.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a shared custom transport.
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Create the [`Client`] with the specified options.
    pub fn build(self) -> Result<Client> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.config.http)?),
        };
        Ok(Client::from_parts(self.config, transport))
    }
}
