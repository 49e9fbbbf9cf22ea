use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub published_year: i32,
    pub added_by: AddedByDto,
    pub average_rating: f64,
    pub total_reviews: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddedByDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Body of book create and update requests.
///
/// Every field is optional at the parsing stage so that missing fields are reported as
/// validation errors instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInputDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub published_year: Option<i64>,
}

/// Raw listing query. Values are kept as strings and parsed leniently: anything unparsable
/// falls back to its default.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookListQueryDto {
    /// Page number, starting at 1 (default 1)
    pub page: Option<String>,
    /// Books per page (default 5, max 100)
    pub limit: Option<String>,
    /// Case-insensitive match on title or author
    pub search: Option<String>,
    /// Genre name, or `all`
    pub genre: Option<String>,
    /// `year_desc`, `year_asc`, `rating_desc`, `rating_asc`; newest first otherwise
    pub sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_books: u64,
    pub has_next: bool,
    pub has_prev: bool,
}
