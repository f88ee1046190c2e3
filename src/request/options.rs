//! Per-call request options and the transport allow-list.
//!
//! [`RequestOptions`] replaces a loose option bag with typed fields. The
//! transport-init subset of those fields is projected out by
//! [`TransportOptions::extract`]; method, body and headers are never part of
//! that projection because the request pipeline sets them explicitly.
//!
//! # Examples
//!
//! ```rust
//! use interpose::request::{CacheMode, RequestOptions, TransportOptions};
//! use serde_json::json;
//!
//! let options = RequestOptions::new()
//!     .params(json!({ "page": 1 }))
//!     .json(json!({ "name": "widget" }))
//!     .cache(CacheMode::NoStore);
//!
//! let transport = TransportOptions::extract(&options);
//! assert_eq!(transport.cache, Some(CacheMode::NoStore));
//! ```

use crate::error::{Error, Result};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, IntoHeaderName};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fields a loose option bag may carry through to the transport.
pub const TRANSPORT_FIELDS: [&str; 8] = [
    "cache",
    "credentials",
    "integrity",
    "keepalive",
    "mode",
    "redirect",
    "referrer",
    "referrerPolicy",
];

/// Cache mode hint for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    /// Let the transport decide.
    Default,
    /// Bypass caches and do not store the response.
    NoStore,
    /// Fetch fresh and refresh caches.
    Reload,
    /// Revalidate with the origin before using a cached response.
    NoCache,
    /// Prefer a cached response, stale or not.
    ForceCache,
    /// Use only a cached response.
    OnlyIfCached,
}

/// Whether credentials accompany the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsMode {
    /// Never send credentials.
    Omit,
    /// Send credentials to the same origin only.
    SameOrigin,
    /// Always send credentials.
    Include,
}

/// Request mode hint for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    /// Cross-origin requests follow CORS.
    Cors,
    /// Cross-origin requests are opaque.
    NoCors,
    /// Cross-origin requests are refused.
    SameOrigin,
    /// Document navigation.
    Navigate,
}

/// How the transport treats redirect responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedirectPolicy {
    /// Follow redirects.
    Follow,
    /// Fail the call when a redirect is returned.
    Error,
    /// Return the redirect response to the caller.
    Manual,
}

/// Referrer policy hint for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferrerPolicy {
    /// Never send a referrer.
    NoReferrer,
    /// Omit the referrer when moving from HTTPS to HTTP.
    NoReferrerWhenDowngrade,
    /// Send only the origin.
    Origin,
    /// Full URL same-origin, origin only cross-origin.
    OriginWhenCrossOrigin,
    /// Send the referrer to the same origin only.
    SameOrigin,
    /// Origin only, and nothing on downgrade.
    StrictOrigin,
    /// Full URL same-origin, origin cross-origin, nothing on downgrade.
    StrictOriginWhenCrossOrigin,
    /// Always send the full URL.
    UnsafeUrl,
}

/// Payload to send as the request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestData {
    /// Serialized as a JSON string.
    Json(Value),
    /// Serialized as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// Sent unchanged.
    Raw {
        /// Body bytes.
        bytes: Bytes,
        /// Content type to send, if any.
        content_type: Option<HeaderValue>,
    },
}

impl RequestData {
    /// Encodes the payload into body bytes and the content type it implies.
    pub fn encode(&self) -> Result<(Bytes, Option<HeaderValue>)> {
        match self {
            RequestData::Json(value) => {
                let body = serde_json::to_vec(value).map_err(Error::Serialization)?;
                Ok((
                    Bytes::from(body),
                    Some(HeaderValue::from_static("application/json")),
                ))
            }
            RequestData::Form(pairs) => {
                let body = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish();
                Ok((
                    Bytes::from(body),
                    Some(HeaderValue::from_static(
                        "application/x-www-form-urlencoded",
                    )),
                ))
            }
            RequestData::Raw {
                bytes,
                content_type,
            } => Ok((bytes.clone(), content_type.clone())),
        }
    }
}

/// The allow-listed transport-init fields of a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransportOptions {
    /// Cache mode hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheMode>,
    /// Credentials mode hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<CredentialsMode>,
    /// Subresource integrity digest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    /// Whether the request may outlive its caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keepalive: Option<bool>,
    /// Request mode hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RequestMode>,
    /// Redirect handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectPolicy>,
    /// Value of the `referer` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Referrer policy hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_policy: Option<ReferrerPolicy>,
    /// Cancellation token, shared with the caller.
    #[serde(skip)]
    pub signal: Option<CancellationToken>,
}

impl TransportOptions {
    /// Copies the allow-listed fields out of `options`.
    pub fn extract(options: &RequestOptions) -> Self {
        Self {
            cache: options.cache,
            credentials: options.credentials,
            integrity: options.integrity.clone(),
            keepalive: options.keepalive,
            mode: options.mode,
            redirect: options.redirect,
            referrer: options.referrer.clone(),
            referrer_policy: options.referrer_policy,
            signal: options.signal.clone(),
        }
    }
}

/// Keeps only the [`TRANSPORT_FIELDS`] keys of a loose option bag.
pub fn extract_transport_fields(bag: &Map<String, Value>) -> Map<String, Value> {
    TRANSPORT_FIELDS
        .iter()
        .filter_map(|key| bag.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

/// Options for a single call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the client base URL for this call.
    pub base_url: Option<String>,
    /// Headers merged over the client defaults.
    pub headers: HeaderMap,
    /// Query parameters, serialized into the URL.
    pub params: Option<Value>,
    /// Request body payload.
    pub data: Option<RequestData>,
    /// Cache mode hint.
    pub cache: Option<CacheMode>,
    /// Credentials mode hint.
    pub credentials: Option<CredentialsMode>,
    /// Subresource integrity digest.
    pub integrity: Option<String>,
    /// Whether the request may outlive its caller.
    pub keepalive: Option<bool>,
    /// Request mode hint.
    pub mode: Option<RequestMode>,
    /// Redirect handling.
    pub redirect: Option<RedirectPolicy>,
    /// Value of the `referer` header.
    pub referrer: Option<String>,
    /// Referrer policy hint.
    pub referrer_policy: Option<ReferrerPolicy>,
    /// Cancellation token, shared with the transport.
    pub signal: Option<CancellationToken>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from a loose JSON bag.
    ///
    /// Recognised keys are `baseUrl`, `headers`, `params`, `data` and the
    /// [`TRANSPORT_FIELDS`]. `method` and `body` are ignored since the
    /// pipeline sets them itself. Any other key is rejected.
    pub fn from_json(bag: Value) -> Result<Self> {
        let Value::Object(map) = bag else {
            return Err(Error::Configuration(
                "request options must be a JSON object".to_string(),
            ));
        };

        let mut options = RequestOptions::new();
        for (key, value) in &map {
            match key.as_str() {
                "baseUrl" => {
                    let base = value.as_str().ok_or_else(|| {
                        Error::Configuration("`baseUrl` must be a string".to_string())
                    })?;
                    options.base_url = Some(base.to_string());
                }
                "headers" => options.headers = headers_from_json(value)?,
                "params" => options.params = Some(value.clone()),
                "data" => options.data = Some(RequestData::Json(value.clone())),
                "method" | "body" => {
                    debug!(key = %key, "ignoring option set explicitly by the pipeline");
                }
                k if TRANSPORT_FIELDS.contains(&k) => {}
                other => {
                    return Err(Error::Configuration(format!(
                        "unknown request option `{}`",
                        other
                    )))
                }
            }
        }

        let transport: TransportOptions =
            serde_json::from_value(Value::Object(extract_transport_fields(&map)))
                .map_err(|e| Error::Configuration(format!("invalid transport option: {}", e)))?;

        Ok(options.transport(transport))
    }

    /// Overrides the client base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add the http headers, replacing values of keys already present.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add the http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the query parameters.
    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets a single query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = match self.params.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        map.insert(key.into(), value.into());
        self.params = Some(Value::Object(map));
        self
    }

    /// Sets the body payload.
    pub fn data(mut self, data: RequestData) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets a JSON body.
    pub fn json(self, value: Value) -> Self {
        self.data(RequestData::Json(value))
    }

    /// Sets a urlencoded form body.
    pub fn form<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.data(RequestData::Form(
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }

    pub fn cache(mut self, cache: CacheMode) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    pub fn keepalive(mut self, keepalive: bool) -> Self {
        self.keepalive = Some(keepalive);
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn redirect(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = Some(redirect);
        self
    }

    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.referrer_policy = Some(policy);
        self
    }

    /// Threads a cancellation token through to the transport.
    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Overwrites the transport fields that are set in `transport`.
    pub fn transport(mut self, transport: TransportOptions) -> Self {
        self.cache = transport.cache.or(self.cache);
        self.credentials = transport.credentials.or(self.credentials);
        self.integrity = transport.integrity.or(self.integrity);
        self.keepalive = transport.keepalive.or(self.keepalive);
        self.mode = transport.mode.or(self.mode);
        self.redirect = transport.redirect.or(self.redirect);
        self.referrer = transport.referrer.or(self.referrer);
        self.referrer_policy = transport.referrer_policy.or(self.referrer_policy);
        self.signal = transport.signal.or(self.signal);
        self
    }
}

fn headers_from_json(value: &Value) -> Result<HeaderMap> {
    let Value::Object(map) = value else {
        return Err(Error::Configuration(
            "`headers` must be an object of strings".to_string(),
        ));
    };

    let mut headers = HeaderMap::new();
    for (name, value) in map {
        let value = value.as_str().ok_or_else(|| {
            Error::InvalidHeader(format!("value of `{}` must be a string", name))
        })?;
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
