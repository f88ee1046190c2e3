//! Example showing request, response and error interposers together

use color_eyre::Result;
use interpose::{error_stage, request_stage, unwrap_data, ClientBuilder, RequestOptions};
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ClientBuilder::new()
        .base_url("https://httpbin.org")
        .header(USER_AGENT, HeaderValue::from_static("interpose-demo/0.1"))
        .build()?
        // Every request asks for JSON
        .compose_request_interposers(vec![request_stage("accept-json", |mut config| {
            config
                .options
                .headers
                .insert(ACCEPT, HeaderValue::from_static("application/json"));
            Some(config)
        })])?
        // httpbin echoes the raw request body under `data`
        .compose_response_interposers(vec![unwrap_data()])?
        .compose_error_interposers(vec![error_stage("tag", |mut error| {
            error.status_text = format!("httpbin: {}", error.status_text);
            error
        })])?;

    let echoed: Option<Value> = client
        .post(
            "/anything",
            Some(
                RequestOptions::new()
                    .param("page", 1)
                    .json(serde_json::json!({ "hello": "world" })),
            ),
        )
        .await?;
    println!("echoed body: {}", echoed.unwrap_or_default());

    match client.get::<Value>("/status/418", None).await {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("failed as expected: {e}"),
    }

    Ok(())
}
