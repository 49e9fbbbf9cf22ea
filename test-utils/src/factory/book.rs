//! Book factory for creating test book documents.

use entity::{book, collection, genre::Genre};

use crate::{
    context::TestContext,
    error::TestError,
    factory::helpers::{increasing_timestamp, next_id, unique_object_id},
};

/// Factory for creating test books with customizable fields.
///
/// Rating fields start at zero, as they do for a freshly added book.
pub struct BookFactory<'a> {
    context: &'a TestContext,
    owner_id: String,
    title: String,
    author: String,
    genre: Genre,
    published_year: i32,
    average_rating: f64,
    total_reviews: i64,
}

impl<'a> BookFactory<'a> {
    /// Creates a new BookFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Book {n}"`, author: `"Author {n}"`
    /// - genre: Fiction, published 2000
    pub fn new(context: &'a TestContext, owner_id: &str) -> Self {
        let n = next_id();
        Self {
            context,
            owner_id: owner_id.to_string(),
            title: format!("Book {n}"),
            author: format!("Author {n}"),
            genre: Genre::Fiction,
            published_year: 2000,
            average_rating: 0.0,
            total_reviews: 0,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub fn published_year(mut self, year: i32) -> Self {
        self.published_year = year;
        self
    }

    /// Pre-sets the stored aggregate, e.g. to check that it gets recomputed.
    pub fn rating(mut self, average_rating: f64, total_reviews: i64) -> Self {
        self.average_rating = average_rating;
        self.total_reviews = total_reviews;
        self
    }

    /// Inserts the book into the context's book collection.
    pub fn build(self) -> Result<book::Model, TestError> {
        let now = increasing_timestamp();
        let model = book::Model {
            id: unique_object_id(),
            description: format!("{} by {}.", self.title, self.author),
            title: self.title,
            author: self.author,
            genre: self.genre,
            published_year: self.published_year,
            added_by: self.owner_id,
            average_rating: self.average_rating,
            total_reviews: self.total_reviews,
            created_at: now,
            updated_at: now,
        };

        self.context.insert(collection::BOOKS, &model)?;
        Ok(model)
    }
}

/// Creates a book owned by `owner_id` with default values.
pub fn create_book(context: &TestContext, owner_id: &str) -> Result<book::Model, TestError> {
    BookFactory::new(context, owner_id).build()
}
