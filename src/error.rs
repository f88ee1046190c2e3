//! Error handling for the interpose library.
//!
//! This module provides centralized error handling for every stage of a call:
//! composing interposers, resolving URLs, encoding request bodies, talking to
//! the transport and decoding responses. Every failure surfaces to the caller
//! through [`Result`]; nothing is logged and discarded.

use crate::response::HttpStatusError;

use thiserror::Error;

/// Errors that can happen when using interpose.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid client or pipeline configuration.
    ///
    /// Returned when composing an empty interposer list, or when a loose
    /// option bag contains a key the client does not recognise.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from the underlying URL parser.
    ///
    /// Returned when the resolved request URL cannot be parsed, typically a
    /// relative path with no base configured and query parameters to attach.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value could not be built.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The transport call itself failed.
    ///
    /// This variant wraps DNS failures, connection resets, transport-level
    /// timeouts and failures while reading the response body.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The caller's cancellation signal fired before the transport finished.
    #[error("Request cancelled")]
    Cancelled,

    /// The response completed with a non-success status.
    #[error("HTTP status error: {0}")]
    HttpStatus(HttpStatusError),

    /// The response body could not be decoded as expected.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    /// Wraps any error as a transport failure.
    pub fn transport<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Transport(error.into())
    }

    /// Returns the status error if this is a failed HTTP status.
    pub fn as_http_status(&self) -> Option<&HttpStatusError> {
        match self {
            Error::HttpStatus(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Transport(Box::new(error))
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::from(e),
            reqwest_middleware::Error::Middleware(e) => Error::Transport(e.into()),
        }
    }
}

impl From<HttpStatusError> for Error {
    fn from(error: HttpStatusError) -> Self {
        Error::HttpStatus(error)
    }
}

/// Result type alias for operations that can fail with an interpose error.
pub type Result<T> = std::result::Result<T, Error>;
