use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's review of a book. At most one review exists per (`book`, `user`) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(rename = "_id")]
    pub id: String,
    /// Id of the reviewed book.
    pub book: String,
    /// Id of the reviewing user.
    pub user: String,
    pub rating: i32,
    pub review_text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}
