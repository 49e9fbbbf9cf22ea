//! Review fixtures.

use entity::review;

use crate::fixture::{fixed_id, timestamp};

/// Creates a review document for `book_id` written by `user_id`.
///
/// # Default Values
/// - id: `fixed_id(1000)`
/// - rating: `4`
/// - review_text: `"Worth reading."`
pub fn entity(book_id: &str, user_id: &str) -> review::Model {
    review::Model {
        id: fixed_id(1000),
        book: book_id.to_string(),
        user: user_id.to_string(),
        rating: 4,
        review_text: "Worth reading.".to_string(),
        created_at: timestamp(10),
        updated_at: timestamp(10),
    }
}
