use futures::future::{BoxFuture, FutureExt};
use interpose::{
    Client, ClientBuilder, Error, ResponseBody, Result, Transport, TransportRequest,
    TransportResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// Common test constants
pub const TEST_BASE_URL: &str = "http://api.test/v1";
pub const TEST_USER_AGENT: &str = "interpose-test-agent";

/// A canned transport reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
    Fail(&'static str),
}

/// A transport that records every request and answers from a queue.
///
/// When the queue is empty it answers `200 {}`.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<TransportRequest>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply.
    pub fn reply(&self, reply: Reply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of dispatched requests.
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request.
    pub fn last(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was dispatched")
    }
}

impl Transport for RecordingTransport {
    fn dispatch(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();

        async move {
            match reply {
                None => Ok(json_response(StatusCode::OK, Value::Object(Default::default()))),
                Some(Reply::Json(status, value)) => Ok(json_response(status, value)),
                Some(Reply::Text(status, text)) => Ok(TransportResponse::new(
                    status,
                    HeaderMap::new(),
                    ResponseBody::from_bytes(text),
                )),
                Some(Reply::Fail(message)) => Err(Error::transport(message)),
            }
        }
        .boxed()
    }
}

/// Builds a JSON transport response.
pub fn json_response(status: StatusCode, value: Value) -> TransportResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    TransportResponse::new(
        status,
        headers,
        ResponseBody::from_bytes(value.to_string()),
    )
}

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a client on the test base URL backed by `transport`.
pub fn create_test_client(transport: &RecordingTransport) -> Client {
    ClientBuilder::new()
        .base_url(TEST_BASE_URL)
        .headers(create_test_headers())
        .transport(transport.clone())
        .build()
        .expect("Failed to build test client")
}

/// Installs a tracing subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
