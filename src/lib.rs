//! Interpose is an HTTP client core built around composable interposers:
//! functions that observe or rewrite a request before it is sent, a decoded
//! response before it is returned, or a failed response before it surfaces.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use interpose::{request_stage, unwrap_data, ClientBuilder, Error, RequestOptions};
//! use reqwest::header::{HeaderValue, AUTHORIZATION};
//! use serde_json::Value;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let client = ClientBuilder::new()
//!     .base_url("https://api.example.com/v1")
//!     .build()?
//!     .compose_request_interposers(vec![request_stage("auth", |mut config| {
//!         config
//!             .options
//!             .headers
//!             .insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret"));
//!         Some(config)
//!     })])?
//!     .compose_response_interposers(vec![unwrap_data()])?;
//!
//! let users: Option<Value> = client
//!     .get("/users", Some(RequestOptions::new().param("page", 2)))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`chain`] - Right-to-left composition and named pipelines
//! - [`client`] - The [`Client`], its builder and configuration
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - The transport seam and the default `reqwest` transport
//! - [`request`] - Request options, the transport allow-list and request interposers
//! - [`response`] - Response envelopes, status errors and their interposers
//! - [`utils`] - URL resolution and query serialization

pub mod chain;
pub mod client;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod utils;

pub use chain::{compose, Interposer, Pipeline, Stage};
pub use client::{Client, ClientBuilder, ClientConfig};
pub use error::{Error, Result};
pub use http::{
    create_http_client, HttpClientConfig, ReqwestTransport, ResponseBody, Transport,
    TransportRequest, TransportResponse,
};
pub use request::{
    request_stage, RequestConfig, RequestData, RequestOptions, TransportOptions,
};
pub use response::{
    error_stage, response_stage, unwrap_data, HttpStatusError, ResponseEnvelope,
};
pub use utils::{is_absolute, join, resolve_url, serialize_params};
