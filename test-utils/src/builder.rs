use entity::{collection, prelude::*};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with seeded collections.
///
/// Documents are collected in memory and written once when `build()` is called. Collections
/// with no seeded documents are left absent so tests can also observe how the storage backend
/// initialises missing files.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, fixture};
///
/// let owner = fixture::user::entity();
/// let test = TestBuilder::new()
///     .with_user(owner.clone())
///     .with_books(fixture::book::catalogue(&owner.id))
///     .build()?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    users: Vec<User>,
    books: Vec<Book>,
    reviews: Vec<Review>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_book(mut self, book: Book) -> Self {
        self.books.push(book);
        self
    }

    pub fn with_books(mut self, books: impl IntoIterator<Item = Book>) -> Self {
        self.books.extend(books);
        self
    }

    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// Creates the temporary directory and writes every non-empty collection.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with the seeded collection files
    /// - `Err(TestError)` - Failed to create the directory or serialise a document
    pub fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        if !self.users.is_empty() {
            context.write(collection::USERS, &self.users)?;
        }
        if !self.books.is_empty() {
            context.write(collection::BOOKS, &self.books)?;
        }
        if !self.reviews.is_empty() {
            context.write(collection::REVIEWS, &self.reviews)?;
        }

        Ok(context)
    }
}
