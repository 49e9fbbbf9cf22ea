use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on a private route.
    #[error("Request has no bearer token")]
    MissingToken,

    /// Bearer token failed signature or expiry validation.
    #[error("Bearer token rejected: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Token is valid but its user no longer exists.
    #[error("User {0} from token not found")]
    UserNotFound(String),

    /// Unknown email or wrong password on login.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Registration with an email that is already taken.
    #[error("User already exists")]
    UserExists,

    /// Authenticated user tried to modify something owned by another user.
    ///
    /// `action` completes the sentence "Not authorized to ...", e.g. "update this book".
    #[error("User {user_id} is not authorized to {action}")]
    NotOwner {
        user_id: String,
        action: &'static str,
    },
}

/// Converts authentication errors into HTTP responses.
///
/// Details are logged at debug level; clients get the fixed messages below.
///
/// # Returns
/// - 400 Bad Request - `UserExists`
/// - 401 Unauthorized - missing or rejected token, bad credentials, not the owner
/// - 404 Not Found - `UserNotFound`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match &self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Not authorized, no token".to_string(),
            ),
            Self::InvalidToken(_) => (
                StatusCode::UNAUTHORIZED,
                "Not authorized, token failed".to_string(),
            ),
            Self::UserNotFound(_) => (StatusCode::NOT_FOUND, "User not found".to_string()),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            Self::UserExists => (StatusCode::BAD_REQUEST, "User already exists".to_string()),
            Self::NotOwner { action, .. } => (
                StatusCode::UNAUTHORIZED,
                format!("Not authorized to {action}"),
            ),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
