//! Interposer composition.
//!
//! This module provides the building blocks the client uses to run request,
//! response and error interposers:
//!
//! - [`compose`] - Right-to-left composition of unary functions
//! - [`pipeline`] - Named stages collected into an inspectable [`Pipeline`]
//!
//! # Examples
//!
//! ```rust
//! use interpose::chain::{Pipeline, Stage};
//!
//! let pipeline = Pipeline::compose(vec![
//!     Stage::new("trim", |s: String| s.trim().to_string()),
//!     Stage::new("shout", |s: String| s.to_uppercase()),
//! ])?;
//!
//! assert_eq!(pipeline.names(), vec!["trim", "shout"]);
//! assert_eq!(pipeline.apply(" hi ".to_string()), "HI");
//! # Ok::<(), interpose::Error>(())
//! ```

pub mod compose;
pub mod pipeline;

pub use compose::{compose, Interposer};
pub use pipeline::{Pipeline, Stage};
