//! Response module containing response envelopes and the interposers that
//! run on them.
//!
//! # Overview
//!
//! - [`envelope`] - [`ResponseEnvelope`] and response interposer stages
//! - [`status`] - [`HttpStatusError`] and error interposer stages

pub mod envelope;
pub mod status;

pub use envelope::{response_stage, unwrap_data, ResponseEnvelope, ResponsePipeline};
pub use status::{error_stage, ErrorPipeline, HttpStatusError};
