#![allow(dead_code)]

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use staff_rs::api::create_router;
use staff_rs::external::{CharactersClient, build_http_client};
use staff_rs::state::AppState;
use tower::ServiceExt;

/// Router over the in-memory store with the characters API at `characters_base`.
pub fn app(characters_base: &str) -> Router {
    let http = build_http_client(5).expect("http client");
    let client = CharactersClient::new(
        http,
        characters_base,
        format!("{}/character/1", characters_base),
    );
    create_router(AppState::in_memory(client), Duration::from_secs(30))
}

/// Router whose characters API is unreachable.
pub fn users_app() -> Router {
    app("http://127.0.0.1:9")
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
