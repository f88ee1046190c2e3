//! HTTP module containing the transport seam and the default transport.
//!
//! # Overview
//!
//! - [`client`] - `reqwest` client creation and middleware configuration
//! - [`transport`] - The [`Transport`] trait and [`ReqwestTransport`]

pub mod client;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig};
pub use transport::{ReqwestTransport, ResponseBody, Transport, TransportRequest, TransportResponse};
