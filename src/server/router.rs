use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, book, health, review},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Bookshelf API", description = "Book catalogue with user reviews"),
    tags(
        (name = "auth", description = "Registration, login and profile"),
        (name = "book", description = "Book catalogue"),
        (name = "review", description = "Book reviews and ratings"),
        (name = "health", description = "Service status")
    ),
    modifiers(&BearerAuth)
)]
struct ApiDoc;

/// Registers the `bearer` scheme referenced by private endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API routes plus Swagger UI at `/swagger-ui`, serving the document at `/api-docs/openapi.json`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::profile))
        .routes(routes!(book::list_books, book::create_book))
        .routes(routes!(book::get_book, book::update_book, book::delete_book))
        .routes(routes!(book::my_books))
        .routes(routes!(
            review::book_reviews,
            review::create_review,
            review::update_review,
            review::delete_review
        ))
        .routes(routes!(review::my_reviews))
        .routes(routes!(health::health))
        .split_for_parts();

    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
}

#[cfg(test)]
mod test;
