//! Request module containing per-call options and request interposers.
//!
//! # Overview
//!
//! - [`options`] - Typed request options, body payloads and the transport allow-list
//! - [`config`] - The merged [`RequestConfig`] and request interposer stages
//!
//! # Examples
//!
//! ```rust
//! use interpose::request::{RequestOptions, TransportOptions};
//! use serde_json::json;
//!
//! let options = RequestOptions::from_json(json!({
//!     "params": { "q": "rust" },
//!     "cache": "no-cache",
//!     "method": "DELETE"
//! }))?;
//!
//! assert!(options.params.is_some());
//! assert!(TransportOptions::extract(&options).cache.is_some());
//! # Ok::<(), interpose::Error>(())
//! ```

pub mod config;
pub mod options;

pub use config::{request_stage, RequestConfig, RequestPipeline};
pub use options::{
    extract_transport_fields, CacheMode, CredentialsMode, RedirectPolicy, ReferrerPolicy,
    RequestData, RequestMode, RequestOptions, TransportOptions, TRANSPORT_FIELDS,
};
