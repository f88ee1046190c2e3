//! The candidate request configuration that flows through request interposers.

use super::options::RequestOptions;
use crate::chain::{Pipeline, Stage};

use reqwest::Method;

/// A request after client defaults have been merged in.
///
/// Request interposers receive and return this value. Returning `None` from
/// a stage cancels the call before anything is sent.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// HTTP method chosen by the call.
    pub method: Method,
    /// Path or absolute URL as passed to the call.
    pub url: String,
    /// Base URL the path is resolved against.
    pub base_url: Option<String>,
    /// Merged per-call options.
    pub options: RequestOptions,
}

/// A chain of request interposers.
pub type RequestPipeline = Pipeline<Option<RequestConfig>>;

/// Lifts a request interposer over the cancellation sentinel.
///
/// Once an earlier stage has returned `None` later stages are skipped.
///
/// ```rust
/// use interpose::request::request_stage;
/// use reqwest::header::{HeaderValue, AUTHORIZATION};
///
/// let auth = request_stage("auth", |mut config| {
///     config
///         .options
///         .headers
///         .insert(AUTHORIZATION, HeaderValue::from_static("Bearer token"));
///     Some(config)
/// });
/// assert_eq!(auth.name(), "auth");
/// ```
pub fn request_stage<F>(name: impl Into<String>, interposer: F) -> Stage<Option<RequestConfig>>
where
    F: Fn(RequestConfig) -> Option<RequestConfig> + Send + Sync + 'static,
{
    Stage::new(name, move |config: Option<RequestConfig>| {
        config.and_then(&interposer)
    })
}
