//! Storage layer for users, books and reviews.
//!
//! Every persistence operation goes through the [`Store`] trait, which has two backends: a
//! MongoDB document store ([`mongo::MongoStore`]) and flat JSON files
//! ([`local::LocalStore`]). Services only ever hold a [`fallback::FallbackStore`], which tries
//! the document store first and reruns an operation locally when the document store is
//! unreachable.
//!
//! Backends accept stored documents from the `entity` crate and return domain models, so the
//! service layer never sees backend-specific types.

pub mod error;
pub mod fallback;
pub mod local;
pub mod mongo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::server::{
    data::error::StoreError,
    model::{
        book::{Book, BookFields, BookQuery},
        rating::RatingSummary,
        review::{Review, ReviewFields},
        user::{User, UserCredentials},
    },
};

/// Conflict message for a second account with the same email.
pub const DUPLICATE_EMAIL: &str = "User already exists";
/// Conflict message for a second review of one book by the same user.
pub const DUPLICATE_REVIEW: &str = "You have already reviewed this book";

/// Persistence operations shared by every backend.
///
/// Lists of reviews and a user's books are returned newest first. Lookups by id set return
/// only the documents that exist, in no particular order.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn insert_user(&self, user: entity::user::Model) -> Result<User, StoreError>;

    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by normalised email, including the password hash.
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError>;

    async fn find_users(&self, ids: &[String]) -> Result<Vec<User>, StoreError>;

    async fn insert_book(&self, book: entity::book::Model) -> Result<Book, StoreError>;

    async fn find_book(&self, id: &str) -> Result<Option<Book>, StoreError>;

    async fn find_books(&self, ids: &[String]) -> Result<Vec<Book>, StoreError>;

    /// Returns one page of matching books and the number of books matching the filter.
    async fn list_books(&self, query: &BookQuery) -> Result<(Vec<Book>, u64), StoreError>;

    async fn books_by_owner(&self, user_id: &str) -> Result<Vec<Book>, StoreError>;

    /// Replaces the editable fields, leaving owner and rating untouched.
    async fn update_book(
        &self,
        id: &str,
        fields: &BookFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Book>, StoreError>;

    async fn delete_book(&self, id: &str) -> Result<bool, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the user already reviewed the book.
    async fn insert_review(&self, review: entity::review::Model) -> Result<Review, StoreError>;

    async fn find_review(&self, id: &str) -> Result<Option<Review>, StoreError>;

    async fn find_user_review(
        &self,
        book_id: &str,
        user_id: &str,
    ) -> Result<Option<Review>, StoreError>;

    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError>;

    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, StoreError>;

    async fn update_review(
        &self,
        id: &str,
        fields: &ReviewFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Review>, StoreError>;

    async fn delete_review(&self, id: &str) -> Result<bool, StoreError>;

    /// Returns the number of reviews removed.
    async fn delete_reviews_for_book(&self, book_id: &str) -> Result<u64, StoreError>;

    /// Recomputes a book's aggregate rating from its reviews and stores it on the book.
    ///
    /// # Returns
    /// - `Ok(Some(summary))` - The stored aggregate
    /// - `Ok(None)` - The book does not exist
    async fn refresh_rating(&self, book_id: &str) -> Result<Option<RatingSummary>, StoreError>;
}
