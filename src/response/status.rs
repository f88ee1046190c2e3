//! Non-success responses and error interposers.

use crate::chain::{Pipeline, Stage};

use reqwest::{header::HeaderMap, StatusCode};
use serde_json::Value;
use std::fmt;

/// A response that completed with a non-success status.
#[derive(Debug, Clone)]
pub struct HttpStatusError {
    /// URL the request was sent to.
    pub url: String,
    /// Response status code.
    pub status: StatusCode,
    /// Reason phrase for `status`.
    pub status_text: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body decoded as JSON, when it could be read and parsed.
    pub body: Option<Value>,
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status_text, self.status.as_u16())
    }
}

impl std::error::Error for HttpStatusError {}

/// A chain of error interposers.
pub type ErrorPipeline = Pipeline<HttpStatusError>;

/// Creates an error interposer stage.
pub fn error_stage<F>(name: impl Into<String>, interposer: F) -> Stage<HttpStatusError>
where
    F: Fn(HttpStatusError) -> HttpStatusError + Send + Sync + 'static,
{
    Stage::new(name, interposer)
}
