use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        review::{ReviewDto, ReviewInputDto, UserReviewDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::review::ReviewFields,
        service::review::ReviewService,
        state::AppState,
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

/// List the reviews of a book, newest first.
///
/// The path id is a book id. A book without reviews, or an unknown book, yields an empty list.
#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Reviews of the book", body = ApiResponse<Vec<ReviewDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn book_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = ReviewService::new(state.store.as_ref())
        .for_book(&book_id)
        .await?
        .into_iter()
        .map(|r| r.into_dto())
        .collect::<Vec<_>>();

    Ok(Json(ApiResponse::data(reviews)))
}

/// Review a book.
///
/// The path id is a book id. Each user may review a book once; the book's rating is
/// recomputed afterwards.
///
/// # Returns
/// - `201 Created` - The stored review
/// - `400 Bad Request` - Validation errors, malformed body or already reviewed
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - No book with this id
#[utoipa::path(
    post,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Book id")
    ),
    request_body = ReviewInputDto,
    responses(
        (status = 201, description = "Review added", body = ApiResponse<ReviewDto>),
        (status = 400, description = "Invalid review or already reviewed", body = ErrorDto),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(book_id): Path<String>,
    payload: Result<Json<ReviewInputDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;
    let Json(payload) = payload?;
    let fields = ReviewFields::from_dto(payload)?;

    let review = ReviewService::new(state.store.as_ref())
        .create(&user, &book_id, fields)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(review.into_dto()).with_message("Review added successfully")),
    ))
}

/// Edit a review.
///
/// The path id is a review id.
///
/// # Access Control
/// - Author only
///
/// # Returns
/// - `200 OK` - The updated review
/// - `400 Bad Request` - Validation errors or malformed body
/// - `401 Unauthorized` - Missing or invalid token, or not the author
/// - `404 Not Found` - No review with this id
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Review id")
    ),
    request_body = ReviewInputDto,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewDto>),
        (status = 400, description = "Invalid review", body = ErrorDto),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<ReviewInputDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;
    let Json(payload) = payload?;
    let fields = ReviewFields::from_dto(payload)?;

    let review = ReviewService::new(state.store.as_ref())
        .update(&user, &id, fields)
        .await?;

    Ok(Json(
        ApiResponse::data(review.into_dto()).with_message("Review updated successfully"),
    ))
}

/// Delete a review.
///
/// The path id is a review id.
///
/// # Access Control
/// - Author only
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "Review deleted", body = MessageDto),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;

    ReviewService::new(state.store.as_ref())
        .delete(&user, &id)
        .await?;

    Ok(Json(MessageDto::new("Review deleted successfully")))
}

/// List the authenticated user's reviews, newest first, with book titles.
#[utoipa::path(
    get,
    path = "/api/reviews/user/myreviews",
    tag = REVIEW_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The user's reviews", body = ApiResponse<Vec<UserReviewDto>>),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn my_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;

    let reviews = ReviewService::new(state.store.as_ref())
        .written_by(&user)
        .await?
        .into_iter()
        .map(|r| r.into_dto())
        .collect::<Vec<_>>();

    Ok(Json(ApiResponse::data(reviews)))
}
