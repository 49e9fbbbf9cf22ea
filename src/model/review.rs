use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of review create and update requests.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInputDto {
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub review_text: String,
}

/// A review as listed under its book, with the reviewer's name.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub book: String,
    pub user: ReviewerDto,
    pub rating: i32,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewerDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A review as listed for its author, with the reviewed book's title and author.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReviewDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub book: ReviewedBookDto,
    pub user: String,
    pub rating: i32,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewedBookDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
}
