//! Review factory for creating test review documents.

use entity::{collection, review};

use crate::{
    context::TestContext,
    error::TestError,
    factory::helpers::{increasing_timestamp, unique_object_id},
};

/// Factory for creating test reviews.
///
/// Inserting a review through the factory does not touch the book's stored aggregate; tests
/// that need it consistent should refresh it through the store.
pub struct ReviewFactory<'a> {
    context: &'a TestContext,
    book_id: String,
    user_id: String,
    rating: i32,
    review_text: String,
}

impl<'a> ReviewFactory<'a> {
    /// Defaults: rating `3`, text `"An honest review."`.
    pub fn new(context: &'a TestContext, book_id: &str, user_id: &str) -> Self {
        Self {
            context,
            book_id: book_id.to_string(),
            user_id: user_id.to_string(),
            rating: 3,
            review_text: "An honest review.".to_string(),
        }
    }

    pub fn rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.review_text = text.into();
        self
    }

    /// Inserts the review into the context's review collection.
    pub fn build(self) -> Result<review::Model, TestError> {
        let now = increasing_timestamp();
        let model = review::Model {
            id: unique_object_id(),
            book: self.book_id,
            user: self.user_id,
            rating: self.rating,
            review_text: self.review_text,
            created_at: now,
            updated_at: now,
        };

        self.context.insert(collection::REVIEWS, &model)?;
        Ok(model)
    }
}

/// Creates a review with default values.
pub fn create_review(
    context: &TestContext,
    book_id: &str,
    user_id: &str,
) -> Result<review::Model, TestError> {
    ReviewFactory::new(context, book_id, user_id).build()
}
