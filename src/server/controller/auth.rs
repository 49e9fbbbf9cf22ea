use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{AuthUserDto, LoginUserDto, RegisterUserDto, UserProfileDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::{LoginUserParams, RegisterUserParams},
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Validates the body, stores the user with a bcrypt password hash and returns the user
/// together with an access token.
///
/// # Returns
/// - `201 Created` - Registered; body carries the token
/// - `400 Bad Request` - Validation errors, malformed body or email already registered
/// - `500 Internal Server Error` - Storage or hashing failure
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<AuthUserDto>),
        (status = 400, description = "Invalid input or email taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let params = RegisterUserParams::from_dto(payload)?;

    let user = AuthService::new(state.store.as_ref(), &state.tokens, state.bcrypt_cost)
        .register(params)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(user.into_dto()).with_message("User registered successfully")),
    ))
}

/// Log in with email and password.
///
/// # Returns
/// - `200 OK` - Credentials accepted; body carries the token
/// - `400 Bad Request` - Validation errors or malformed body
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `500 Internal Server Error` - Storage or hashing failure
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginUserDto,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<AuthUserDto>),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginUserDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let params = LoginUserParams::from_dto(payload)?;

    let user = AuthService::new(state.store.as_ref(), &state.tokens, state.bcrypt_cost)
        .login(params)
        .await?;

    Ok(Json(
        ApiResponse::data(user.into_dto()).with_message("Login successful"),
    ))
}

/// Get the authenticated user's profile.
///
/// # Returns
/// - `200 OK` - Profile of the token's user
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - The token's user no longer exists
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserProfileDto>),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;

    Ok(Json(ApiResponse::data(user.into_profile_dto())))
}
