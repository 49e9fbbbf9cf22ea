mod review;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, context::TestContext, error::TestError, factory};
use tower::ServiceExt;

use crate::server::{router::router, state::AppState};

/// The full application over local storage in the context's data directory.
async fn app(test: &TestContext) -> (Router, AppState) {
    let state = AppState::for_test(test.data_dir()).await;
    (router().with_state(state.clone()), state)
}

fn token_for(state: &AppState, user_id: &str) -> String {
    state.tokens.issue(user_id).unwrap()
}

/// Sends one request and returns the status with the parsed JSON body (`Null` when empty).
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string());
    send_raw(app, method, uri, token, body.as_deref()).await
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

fn book_body(title: &str) -> Value {
    json!({
        "title": title,
        "author": "Frank Herbert",
        "description": "Spice and sandworms.",
        "genre": "Science Fiction",
        "publishedYear": 1965
    })
}
