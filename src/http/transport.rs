//! The transport seam and its `reqwest` implementation.
//!
//! The client core never performs network I/O itself. It hands a
//! [`TransportRequest`] to a [`Transport`] and receives a
//! [`TransportResponse`] whose body is read lazily.
//!
//! # Examples
//!
//! A transport that answers every request locally:
//!
//! ```rust
//! use futures::future::{BoxFuture, FutureExt};
//! use interpose::http::{ResponseBody, Transport, TransportRequest, TransportResponse};
//! use reqwest::{header::HeaderMap, StatusCode};
//!
//! struct Canned;
//!
//! impl Transport for Canned {
//!     fn dispatch(
//!         &self,
//!         _request: TransportRequest,
//!     ) -> BoxFuture<'_, interpose::Result<TransportResponse>> {
//!         async move {
//!             Ok(TransportResponse::new(
//!                 StatusCode::OK,
//!                 HeaderMap::new(),
//!                 ResponseBody::from_bytes(r#"{"ok":true}"#),
//!             ))
//!         }
//!         .boxed()
//!     }
//! }
//! ```

use super::client::{create_http_client, HttpClientConfig};
use crate::error::{Error, Result};
use crate::request::{CacheMode, RedirectPolicy, TransportOptions};

use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use reqwest::{
    header::{HeaderMap, HeaderValue, CACHE_CONTROL, LOCATION, PRAGMA, REFERER},
    redirect::Policy,
    Method, StatusCode,
};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A fully built request, ready to be sent.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully resolved URL, query included.
    pub url: String,
    /// Merged request headers.
    pub headers: HeaderMap,
    /// Encoded body, if any.
    pub body: Option<Bytes>,
    /// Allow-listed transport options.
    pub options: TransportOptions,
}

/// A deferred response body reader.
pub struct ResponseBody(BoxFuture<'static, Result<Bytes>>);

impl ResponseBody {
    /// A body that is already in memory.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self(async move { Ok(bytes) }.boxed())
    }

    /// An empty body.
    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    /// A body read by `future`.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<Bytes>> + Send + 'static,
    {
        Self(future.boxed())
    }

    /// Reads the whole body.
    pub async fn bytes(self) -> Result<Bytes> {
        self.0.await
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseBody { .. }")
    }
}

/// Status line and headers of a response, with its unread body.
#[derive(Debug)]
pub struct TransportResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Reason phrase for `status`.
    pub status_text: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Unread response body.
    pub body: ResponseBody,
}

impl TransportResponse {
    /// Creates a response using the canonical reason phrase as status text.
    ///
    /// `reqwest` does not expose the reason phrase a server actually sent, so
    /// [`ReqwestTransport`] always reports the canonical one. Custom transports
    /// that know the real phrase can overwrite `status_text` afterwards.
    pub fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }
}

/// The network-call collaborator.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response once its headers arrive.
    fn dispatch(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>>;
}

/// The default transport, backed by `reqwest-middleware` clients.
#[derive(Clone)]
pub struct ReqwestTransport {
    follow: ClientWithMiddleware,
    no_redirect: ClientWithMiddleware,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Builds the following and the non-following clients.
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        Ok(Self {
            follow: create_http_client(config, Policy::default())?,
            no_redirect: create_http_client(config, Policy::none())?,
        })
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let TransportRequest {
            method,
            url,
            mut headers,
            body,
            options,
        } = request;

        apply_hints(&mut headers, &options)?;

        let client = match options.redirect {
            Some(RedirectPolicy::Manual) | Some(RedirectPolicy::Error) => &self.no_redirect,
            _ => &self.follow,
        };

        let mut builder = client.request(method, url.as_str()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = cancellable(builder.send(), options.signal.clone()).await??;

        if options.redirect == Some(RedirectPolicy::Error) && response.status().is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            return Err(Error::transport(format!(
                "redirect from {} to \"{}\" refused by redirect policy",
                url, location
            )));
        }

        let status = response.status();
        let headers = response.headers().clone();
        let signal = options.signal;
        let body = ResponseBody::from_future(async move {
            cancellable(response.bytes(), signal).await?.map_err(Error::from)
        });

        Ok(TransportResponse::new(status, headers, body))
    }
}

impl Transport for ReqwestTransport {
    fn dispatch(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        self.send(request).boxed()
    }
}

/// Races `future` against the cancellation token, if any.
async fn cancellable<F, T>(future: F, signal: Option<CancellationToken>) -> Result<T>
where
    F: Future<Output = T>,
{
    match signal {
        Some(signal) => tokio::select! {
            _ = signal.cancelled() => Err(Error::Cancelled),
            out = future => Ok(out),
        },
        None => Ok(future.await),
    }
}

/// Maps transport hints onto request headers where HTTP has an equivalent.
fn apply_hints(headers: &mut HeaderMap, options: &TransportOptions) -> Result<()> {
    match options.cache {
        Some(CacheMode::NoStore) => {
            headers
                .entry(CACHE_CONTROL)
                .or_insert(HeaderValue::from_static("no-store"));
        }
        Some(CacheMode::NoCache) => {
            headers
                .entry(CACHE_CONTROL)
                .or_insert(HeaderValue::from_static("max-age=0"));
        }
        Some(CacheMode::Reload) => {
            headers
                .entry(CACHE_CONTROL)
                .or_insert(HeaderValue::from_static("no-cache"));
            headers
                .entry(PRAGMA)
                .or_insert(HeaderValue::from_static("no-cache"));
        }
        _ => {}
    }

    if let Some(referrer) = options.referrer.as_deref().filter(|r| !r.is_empty()) {
        if !headers.contains_key(REFERER) {
            let value = HeaderValue::from_str(referrer)
                .map_err(|e| Error::InvalidHeader(format!("referer: {}", e)))?;
            headers.insert(REFERER, value);
        }
    }

    if options.credentials.is_some()
        || options.mode.is_some()
        || options.keepalive.is_some()
        || options.integrity.is_some()
        || options.referrer_policy.is_some()
    {
        debug!(?options, "transport hints without an HTTP equivalent are not applied");
    }

    Ok(())
}
