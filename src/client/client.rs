//! Core client implementation with the request and response pipelines.
//!
//! # Examples
//!
//! ```rust,no_run
//! use interpose::client::ClientBuilder;
//! use interpose::response::unwrap_data;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//! }
//!
//! # async fn example() -> interpose::Result<()> {
//! let client = ClientBuilder::new()
//!     .base_url("https://api.example.com")
//!     .build()?
//!     .compose_response_interposers(vec![unwrap_data()])?;
//!
//! let user: Option<User> = client.get("/users/1", None).await?;
//! # Ok(())
//! # }
//! ```

use super::{builder::ClientBuilder, config::ClientConfig};
use crate::chain::{Pipeline, Stage};
use crate::error::{Error, Result};
use crate::http::{Transport, TransportRequest, TransportResponse};
use crate::request::{RequestConfig, RequestOptions, RequestPipeline, TransportOptions};
use crate::response::{ErrorPipeline, HttpStatusError, ResponseEnvelope, ResponsePipeline};
use crate::utils::resolve_url;

use reqwest::{
    header::{HeaderMap, CONTENT_TYPE},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// An HTTP client with request, response and error interposers.
///
/// Cloning is cheap: the configuration, transport and interposer chains are
/// shared. Recomposing a chain consumes the client and returns a new value,
/// so calls already in flight keep the chains they started with.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    request: RequestPipeline,
    response: ResponsePipeline,
    error: Option<ErrorPipeline>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("request", &self.request)
            .field("response", &self.response)
            .field("error", &self.error)
            .finish()
    }
}

impl Client {
    /// Creates a client with the default transport.
    pub fn new(base_url: Option<&str>, headers: HeaderMap) -> Result<Self> {
        let mut builder = ClientBuilder::new().headers(headers);
        if let Some(base_url) = base_url {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Creates a [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            request: Pipeline::identity(),
            response: Pipeline::identity(),
            error: None,
        }
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.config.base_url.as_deref()
    }

    /// Gets the default headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.config.headers
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Gets the request interposer chain.
    pub fn request_interposers(&self) -> &RequestPipeline {
        &self.request
    }

    /// Gets the response interposer chain.
    pub fn response_interposers(&self) -> &ResponsePipeline {
        &self.response
    }

    /// Gets the error interposer chain, if one is set.
    pub fn error_interposers(&self) -> Option<&ErrorPipeline> {
        self.error.as_ref()
    }

    /// Replaces the request interposer chain.
    pub fn compose_request_interposers(
        mut self,
        stages: Vec<Stage<Option<RequestConfig>>>,
    ) -> Result<Self> {
        self.request = Pipeline::compose(stages)?;
        Ok(self)
    }

    /// Replaces the response interposer chain.
    pub fn compose_response_interposers(
        mut self,
        stages: Vec<Stage<Result<ResponseEnvelope>>>,
    ) -> Result<Self> {
        self.response = Pipeline::compose(stages)?;
        Ok(self)
    }

    /// Replaces the error interposer chain.
    pub fn compose_error_interposers(
        mut self,
        stages: Vec<Stage<HttpStatusError>>,
    ) -> Result<Self> {
        self.error = Some(Pipeline::compose(stages)?);
        Ok(self)
    }

    /// Sends a `GET` request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>> {
        self.request(Method::GET, url, options).await
    }

    /// Sends a `POST` request.
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>> {
        self.request(Method::POST, url, options).await
    }

    /// Sends a `PUT` request.
    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>> {
        self.request(Method::PUT, url, options).await
    }

    /// Sends a `PATCH` request.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>> {
        self.request(Method::PATCH, url, options).await
    }

    /// Sends a `DELETE` request.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>> {
        self.request(Method::DELETE, url, options).await
    }

    /// Sends a `HEAD` request.
    pub async fn head<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>> {
        self.request(Method::HEAD, url, options).await
    }

    /// Runs a request through the pipelines.
    ///
    /// Resolves to `Ok(None)` when a request interposer cancels the call; no
    /// request is sent in that case.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>> {
        let candidate = self.merge(method, url, options.unwrap_or_default());

        let Some(config) = self.request.apply(Some(candidate)) else {
            debug!(url, "request cancelled by interposer");
            return Ok(None);
        };

        let request = self.build(config)?;

        if request
            .options
            .signal
            .as_ref()
            .is_some_and(|signal| signal.is_cancelled())
        {
            return Err(Error::Cancelled);
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let url = request.url.clone();
        let response = self.transport.dispatch(request).await?;

        self.on_response(&url, response).await.map(Some)
    }

    /// Merges client defaults with per-call options.
    fn merge(&self, method: Method, url: &str, mut options: RequestOptions) -> RequestConfig {
        let mut headers = self.config.headers.clone();
        headers.extend(std::mem::take(&mut options.headers));
        options.headers = headers;

        let base_url = options
            .base_url
            .clone()
            .or_else(|| self.config.base_url.clone());

        RequestConfig {
            method,
            url: url.to_string(),
            base_url,
            options,
        }
    }

    /// Turns a resolved config into a transport request.
    fn build(&self, config: RequestConfig) -> Result<TransportRequest> {
        let url = resolve_url(
            &config.url,
            config.base_url.as_deref(),
            config.options.params.as_ref(),
        )?;

        // Defaults were layered in by `merge`; interposers may have removed some.
        let mut headers = config.options.headers.clone();

        let body = match &config.options.data {
            Some(data) => {
                let (bytes, content_type) = data.encode()?;
                if let Some(content_type) = content_type {
                    headers.entry(CONTENT_TYPE).or_insert(content_type);
                }
                Some(bytes)
            }
            None => None,
        };

        Ok(TransportRequest {
            method: config.method,
            url,
            headers,
            body,
            options: TransportOptions::extract(&config.options),
        })
    }

    /// Validates, decodes and interposes a transport response.
    async fn on_response<T: DeserializeOwned>(
        &self,
        url: &str,
        response: TransportResponse,
    ) -> Result<T> {
        trace!(url, status = %response.status, "response received");

        let TransportResponse {
            status,
            status_text,
            headers,
            body,
        } = response;

        if !status.is_success() {
            let body = match body.bytes().await {
                Ok(bytes) if !bytes.is_empty() => serde_json::from_slice(&bytes).ok(),
                Ok(_) => None,
                Err(e) => {
                    debug!(url, error = %e, "could not read body of failed response");
                    None
                }
            };

            let error = HttpStatusError {
                url: url.to_string(),
                status,
                status_text,
                headers,
                body,
            };
            let error = match &self.error {
                Some(pipeline) => pipeline.apply(error),
                None => error,
            };

            debug!(url, status = %error.status, "request failed with status");
            return Err(Error::HttpStatus(error));
        }

        trace!(url, "parsing response body");
        let bytes = body.bytes().await?;
        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(Error::Parse)?
        };

        let envelope = ResponseEnvelope {
            url: url.to_string(),
            status,
            status_text,
            ok: true,
            headers,
            data,
        };

        trace!(url, "running response interposers");
        let envelope = self.response.apply(Ok(envelope))?;

        serde_json::from_value(envelope.data).map_err(Error::Parse)
    }
}
