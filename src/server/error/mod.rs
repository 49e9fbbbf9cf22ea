//! Application errors and their HTTP responses.
//!
//! Handlers return `Result<_, AppError>`; every lower-level error converts into `AppError` with
//! `?`, and `AppError` renders itself as the JSON error body with the right status.

pub mod auth;
pub mod config;
pub mod validation;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        data::error::StoreError,
        error::{auth::AuthError, config::ConfigError, validation::ValidationErrors},
    },
};

/// Every error a request or startup can end in.
///
/// `AuthError` and `ValidationErrors` choose their own status; the rest map below.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing environment variable.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Token, credential or ownership failure.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Storage error from whichever backend served the request.
    ///
    /// Uniqueness conflicts become 400 Bad Request, everything else 500.
    #[error(transparent)]
    StoreErr(#[from] StoreError),

    /// Request body failed one or more input rules.
    ///
    /// Results in 400 Bad Request listing every failed field.
    #[error(transparent)]
    ValidationErr(#[from] ValidationErrors),

    /// Request body was not valid JSON for the endpoint.
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// Token signing failure.
    #[error(transparent)]
    TokenErr(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure.
    #[error(transparent)]
    HashErr(#[from] bcrypt::BcryptError),

    /// A blocking task (password hashing) panicked or was cancelled.
    #[error(transparent)]
    JoinErr(#[from] tokio::task::JoinError),

    /// IO failure outside the storage layer, e.g. binding the listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// 404 with the given message, e.g. "Book not found".
    #[error("{0}")]
    NotFound(String),

    /// 400 with the given message.
    #[error("{0}")]
    BadRequest(String),

    /// An operation that should have succeeded did not.
    ///
    /// Results in 500 Internal Server Error carrying the provided message.
    #[error("{0}")]
    OperationFailed(String),
}

/// # Returns
/// - 400 Bad Request - `BadRequest`, validation failures, malformed bodies, uniqueness conflicts
/// - 404 Not Found - `NotFound`
/// - 500 Internal Server Error - `OperationFailed` with its message, anything else as "Server error"
/// - `AuthErr` - status chosen by `AuthError`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::ValidationErr(err) => err.into_response(),
            Self::JsonRejection(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto::new(rejection.body_text())),
                )
                    .into_response()
            }
            Self::StoreErr(StoreError::Conflict(msg)) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::OperationFailed(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDto::new(msg))).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Logs any displayable error and answers 500 "Server error".
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Server error")),
        )
            .into_response()
    }
}

#[cfg(test)]
mod test;
