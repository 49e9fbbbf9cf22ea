use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        book::{BookDto, BookInputDto, BookListQueryDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::book::{BookFields, BookQuery},
        service::book::BookService,
        state::AppState,
    },
};

/// Tag for grouping book endpoints in OpenAPI documentation
pub static BOOK_TAG: &str = "book";

/// List books with search, genre filter, sorting and pagination.
///
/// Unparsable `page` or `limit` values fall back to their defaults; `limit` is capped at 100.
///
/// # Returns
/// - `200 OK` - One page of books with pagination metadata
/// - `400 Bad Request` - Unknown genre filter
/// - `500 Internal Server Error` - Storage error
#[utoipa::path(
    get,
    path = "/api/books",
    tag = BOOK_TAG,
    params(BookListQueryDto),
    responses(
        (status = 200, description = "Page of books", body = ApiResponse<Vec<BookDto>>),
        (status = 400, description = "Invalid filter", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookListQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let query = BookQuery::from_dto(query)?;

    let page = BookService::new(state.store.as_ref()).list(query).await?;
    let pagination = page.pagination();
    let books = page.books.into_iter().map(|b| b.into_dto()).collect::<Vec<_>>();

    Ok(Json(ApiResponse::data(books).with_pagination(pagination)))
}

/// Get a single book.
///
/// # Returns
/// - `200 OK` - The book with its owner's name
/// - `404 Not Found` - No book with this id
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = BOOK_TAG,
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "The book", body = ApiResponse<BookDto>),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let book = BookService::new(state.store.as_ref()).get(&id).await?;

    Ok(Json(ApiResponse::data(book.into_dto())))
}

/// Add a book to the catalogue.
///
/// The authenticated user becomes the book's owner. The rating starts at zero.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `201 Created` - The stored book
/// - `400 Bad Request` - Validation errors or malformed body
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    post,
    path = "/api/books",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    request_body = BookInputDto,
    responses(
        (status = 201, description = "Book created", body = ApiResponse<BookDto>),
        (status = 400, description = "Invalid book data", body = ErrorDto),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BookInputDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;
    let Json(payload) = payload?;
    let fields = BookFields::from_dto(payload, Utc::now().year())?;

    let book = BookService::new(state.store.as_ref())
        .create(&user, fields)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(book.into_dto()).with_message("Book created successfully")),
    ))
}

/// Replace a book's details.
///
/// # Access Control
/// - Owner only
///
/// # Returns
/// - `200 OK` - The updated book
/// - `400 Bad Request` - Validation errors or malformed body
/// - `401 Unauthorized` - Missing or invalid token, or not the owner
/// - `404 Not Found` - No book with this id
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Book id")
    ),
    request_body = BookInputDto,
    responses(
        (status = 200, description = "Book updated", body = ApiResponse<BookDto>),
        (status = 400, description = "Invalid book data", body = ErrorDto),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<BookInputDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;
    let Json(payload) = payload?;
    let fields = BookFields::from_dto(payload, Utc::now().year())?;

    let book = BookService::new(state.store.as_ref())
        .update(&user, &id, fields)
        .await?;

    Ok(Json(
        ApiResponse::data(book.into_dto()).with_message("Book updated successfully"),
    ))
}

/// Delete a book together with all of its reviews.
///
/// # Access Control
/// - Owner only
///
/// # Returns
/// - `200 OK` - Book deleted
/// - `401 Unauthorized` - Missing or invalid token, or not the owner
/// - `404 Not Found` - No book with this id
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageDto),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;

    BookService::new(state.store.as_ref())
        .delete(&user, &id)
        .await?;

    Ok(Json(MessageDto::new("Book deleted successfully")))
}

/// List the books added by the authenticated user, newest first.
#[utoipa::path(
    get,
    path = "/api/books/user/mybooks",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The user's books", body = ApiResponse<Vec<BookDto>>),
        (status = 401, description = "Not authorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn my_books(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require().await?;

    let books = BookService::new(state.store.as_ref())
        .owned_by(&user)
        .await?
        .into_iter()
        .map(|b| b.into_dto())
        .collect::<Vec<_>>();

    Ok(Json(ApiResponse::data(books)))
}
