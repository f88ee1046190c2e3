//! Successful response envelopes and response interposers.

use crate::chain::{Pipeline, Stage};
use crate::error::Result;

use reqwest::{header::HeaderMap, StatusCode};
use serde_json::Value;

/// Response metadata together with the decoded JSON body.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// URL the request was sent to.
    pub url: String,
    /// Response status code.
    pub status: StatusCode,
    /// Reason phrase for `status`.
    pub status_text: String,
    /// Whether `status` is in the 2xx range.
    pub ok: bool,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded body. Response interposers rewrite this; the call resolves to
    /// whatever it holds after the last stage.
    pub data: Value,
}

/// A chain of response interposers.
pub type ResponsePipeline = Pipeline<Result<ResponseEnvelope>>;

/// Lifts a fallible response interposer over earlier failures.
///
/// An error returned by an inner stage is passed outward untouched.
pub fn response_stage<F>(
    name: impl Into<String>,
    interposer: F,
) -> Stage<Result<ResponseEnvelope>>
where
    F: Fn(ResponseEnvelope) -> Result<ResponseEnvelope> + Send + Sync + 'static,
{
    Stage::new(name, move |envelope: Result<ResponseEnvelope>| {
        envelope.and_then(&interposer)
    })
}

/// Replaces `data` with its `data` field, or `null` when absent.
///
/// ```rust
/// use interpose::chain::Pipeline;
/// use interpose::response::{unwrap_data, ResponseEnvelope};
/// use reqwest::{header::HeaderMap, StatusCode};
/// use serde_json::json;
///
/// let envelope = ResponseEnvelope {
///     url: "http://x/users/1".to_string(),
///     status: StatusCode::OK,
///     status_text: "OK".to_string(),
///     ok: true,
///     headers: HeaderMap::new(),
///     data: json!({ "data": { "id": 1 } }),
/// };
/// let pipeline = Pipeline::compose(vec![unwrap_data()])?;
/// assert_eq!(pipeline.apply(Ok(envelope))?.data, json!({ "id": 1 }));
/// # Ok::<(), interpose::Error>(())
/// ```
pub fn unwrap_data() -> Stage<Result<ResponseEnvelope>> {
    response_stage("unwrap-data", |mut envelope| {
        envelope.data = match envelope.data {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
            _ => Value::Null,
        };
        Ok(envelope)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn envelope(data: Value) -> ResponseEnvelope {
        ResponseEnvelope {
            url: "http://x/".to_string(),
            status: StatusCode::OK,
            status_text: "OK".to_string(),
            ok: true,
            headers: HeaderMap::new(),
            data,
        }
    }

    #[test]
    fn test_unwrap_data_missing_field_is_null() {
        let out = unwrap_data().apply(Ok(envelope(json!({ "items": [] })))).unwrap();
        assert_eq!(out.data, Value::Null);
    }

    #[test]
    fn test_response_stage_propagates_errors() {
        let stage = response_stage("reject", |_| {
            Err(Error::Configuration("rejected".to_string()))
        });
        let outer = unwrap_data();

        let result = outer.apply(stage.apply(Ok(envelope(json!({ "data": 1 })))));
        assert!(matches!(result, Err(Error::Configuration(msg)) if msg == "rejected"));
    }
}
