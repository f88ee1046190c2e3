//! Client module containing the [`Client`], its builder and configuration.
//!
//! # Overview
//!
//! - `client` - The [`Client`] with its request and response pipelines
//! - `builder` - [`ClientBuilder`] for configuring a client
//! - `config` - [`ClientConfig`], the defaults shared by every call
//!
//! # Examples
//!
//! ## Cancelling Requests From an Interposer
//!
//! ```rust
//! use interpose::client::ClientBuilder;
//! use interpose::request::request_stage;
//!
//! # async fn example() -> interpose::Result<()> {
//! let client = ClientBuilder::new()
//!     .base_url("https://api.example.com")
//!     .build()?
//!     .compose_request_interposers(vec![request_stage("offline", |_| None)])?;
//!
//! // Nothing is sent; the call resolves to the sentinel.
//! let value: Option<serde_json::Value> = client.get("/status", None).await?;
//! assert!(value.is_none());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;

pub use builder::ClientBuilder;
pub use client::Client;
pub use config::ClientConfig;
