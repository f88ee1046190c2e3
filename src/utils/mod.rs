//! Shared utility functions.
//!
//! This module contains the pure helpers the request pipeline uses to build
//! the final request URL.
//!
//! # Overview
//!
//! - [`url`] - Absolute-path detection, base joining and query attachment
//! - [`query`] - Deterministic query-string serialization
//!
//! # Examples
//!
//! ```rust
//! use interpose::utils::resolve_url;
//! use serde_json::json;
//!
//! let params = json!({ "page": 2 });
//! let url = resolve_url("/users", Some("https://api.example.com/v1/"), Some(&params))?;
//! assert_eq!(url, "https://api.example.com/v1/users?page=2");
//! # Ok::<(), interpose::Error>(())
//! ```

pub mod query;
pub mod url;

pub use query::serialize_params;
pub use url::{is_absolute, join, resolve_url};
