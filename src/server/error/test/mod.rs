use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use serde_json::{json, Value};

use crate::server::{data::error::StoreError, error::AppError};


/// Renders an error and returns its status with the parsed JSON body.
async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}
