//! End-to-end tests of the default transport against a local axum server.

use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use interpose::request::{CacheMode, RedirectPolicy};
use interpose::{unwrap_data, Client, ClientBuilder, Error, RequestOptions};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mod common;
use common::helpers::*;

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u64,
    name: String,
}

async fn get_user(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({ "data": { "id": id, "name": format!("user-{id}") } }))
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({ "data": { "body": body, "contentType": content_type } }))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let pick = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    Json(json!({
        "data": {
            "userAgent": pick("user-agent"),
            "authorization": pick("authorization"),
            "cacheControl": pick("cache-control"),
            "referer": pick("referer"),
        }
    }))
}

async fn echo_query(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "data": query }))
}

async fn missing() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "gone" })))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "data": "late" }))
}

/// Starts the test server on a random port and returns its base URL.
async fn spawn_server() -> String {
    let app = Router::new()
        .route("/users/{id}", get(get_user))
        .route("/echo", post(echo))
        .route("/headers", get(echo_headers))
        .route("/search", get(echo_query))
        .route("/missing", get(missing))
        .route("/slow", get(slow))
        .route("/moved", get(|| async { Redirect::temporary("/users/7") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn client() -> Client {
    init_tracing();
    let base = spawn_server().await;
    ClientBuilder::new()
        .base_url(format!("{base}/"))
        .headers(create_test_headers())
        .build()
        .unwrap()
        .compose_response_interposers(vec![unwrap_data()])
        .unwrap()
}

#[tokio::test]
async fn test_get_and_unwrap() {
    let user: Option<User> = client().await.get("/users/3", None).await.unwrap();
    assert_eq!(
        user,
        Some(User {
            id: 3,
            name: "user-3".to_string()
        })
    );
}

#[tokio::test]
async fn test_post_json_body() {
    let echoed: Option<Value> = client()
        .await
        .post("echo", Some(RequestOptions::new().json(json!({ "a": [1, 2] }))))
        .await
        .unwrap();

    let echoed = echoed.unwrap();
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"], r#"{"a":[1,2]}"#);
}

#[tokio::test]
async fn test_post_form_body() {
    let echoed: Option<Value> = client()
        .await
        .post("/echo", Some(RequestOptions::new().form([("q", "a b")])))
        .await
        .unwrap();

    let echoed = echoed.unwrap();
    assert_eq!(echoed["contentType"], "application/x-www-form-urlencoded");
    assert_eq!(echoed["body"], "q=a+b");
}

#[tokio::test]
async fn test_query_params_reach_server() {
    let query: Option<String> = client()
        .await
        .get(
            "/search?stale=1",
            Some(RequestOptions::new().params(json!({ "ids": [1, 2], "q": "x" }))),
        )
        .await
        .unwrap();
    assert_eq!(query.as_deref(), Some("ids=1%2C2&q=x"));
}

#[tokio::test]
async fn test_default_and_call_headers_reach_server() {
    let seen: Option<Value> = client()
        .await
        .get(
            "/headers",
            Some(
                RequestOptions::new()
                    .header(AUTHORIZATION, HeaderValue::from_static("Bearer call"))
                    .cache(CacheMode::NoStore)
                    .referrer("http://app.test/page"),
            ),
        )
        .await
        .unwrap();

    let seen = seen.unwrap();
    assert_eq!(seen["userAgent"], TEST_USER_AGENT);
    assert_eq!(seen["authorization"], "Bearer call");
    assert_eq!(seen["cacheControl"], "no-store");
    assert_eq!(seen["referer"], "http://app.test/page");
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let error = client()
        .await
        .get::<Value>("/missing", None)
        .await
        .unwrap_err();

    let status = error.as_http_status().unwrap();
    assert_eq!(status.status, StatusCode::NOT_FOUND);
    assert_eq!(status.status_text, "Not Found");
    assert_eq!(status.body, Some(json!({ "message": "gone" })));
}

#[tokio::test]
async fn test_redirect_follow() {
    let user: Option<User> = client()
        .await
        .get("/moved", Some(RequestOptions::new().redirect(RedirectPolicy::Follow)))
        .await
        .unwrap();
    assert_eq!(user.unwrap().id, 7);
}

#[tokio::test]
async fn test_redirect_manual_returns_redirect_status() {
    let error = client()
        .await
        .get::<Value>("/moved", Some(RequestOptions::new().redirect(RedirectPolicy::Manual)))
        .await
        .unwrap_err();
    assert_eq!(
        error.as_http_status().unwrap().status,
        StatusCode::TEMPORARY_REDIRECT
    );
}

#[tokio::test]
async fn test_redirect_error_is_transport_error() {
    let result = client()
        .await
        .get::<Value>("/moved", Some(RequestOptions::new().redirect(RedirectPolicy::Error)))
        .await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_signal_cancels_in_flight_request() {
    let client = client().await;
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = client
        .get::<Value>("/slow", Some(RequestOptions::new().signal(token)))
        .await;
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = format!("http://{addr}");
    let client = Client::new(Some(base.as_str()), create_test_headers()).unwrap();
    let result = client.get::<Value>("/users/1", None).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}
