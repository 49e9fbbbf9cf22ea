//! Failover between the document store and local JSON storage.

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::server::{
    data::{error::StoreError, local::LocalStore, Store},
    model::{
        book::{Book, BookFields, BookQuery},
        rating::RatingSummary,
        review::{Review, ReviewFields},
        user::{User, UserCredentials},
    },
};

/// Runs `$call` against the primary when it is usable, and against the local store when there
/// is no primary, the primary is cooling down, or the primary reports itself unavailable.
macro_rules! with_fallback {
    ($self:ident, $op:literal, |$store:ident| $call:expr) => {{
        if let Some($store) = $self.active_primary() {
            match $call.await {
                Err(StoreError::Unavailable(reason)) => $self.mark_primary_down($op, &reason),
                result => return result,
            }
        }
        let $store = &$self.local;
        $call.await
    }};
}

/// A [`Store`] that prefers an optional primary backend and falls back to [`LocalStore`].
///
/// Only [`StoreError::Unavailable`] triggers the fallback; every other primary error is
/// returned as-is. After a fallback the primary is skipped until `retry_after` has passed.
/// Writes served locally stay local; nothing is copied back to the primary.
pub struct FallbackStore {
    primary: Option<Arc<dyn Store>>,
    local: LocalStore,
    retry_after: Duration,
    down_until: Mutex<Option<Instant>>,
}

impl FallbackStore {
    pub fn new(primary: Option<Arc<dyn Store>>, local: LocalStore, retry_after: Duration) -> Self {
        Self {
            primary,
            local,
            retry_after,
            down_until: Mutex::new(None),
        }
    }

    /// A store that never leaves local storage.
    pub fn local_only(local: LocalStore) -> Self {
        Self::new(None, local, Duration::ZERO)
    }

    /// Backend currently serving requests: `document` or `local`.
    ///
    /// Read-only: a primary whose cooldown has run out still reports `local` until a request
    /// has actually been retried against it.
    pub fn mode(&self) -> &'static str {
        let marked_down = self
            .down_until
            .lock()
            .map(|down_until| down_until.is_some())
            .unwrap_or(false);

        match &self.primary {
            Some(primary) if !marked_down => primary.backend(),
            _ => self.local.backend(),
        }
    }

    /// Starts the cooldown without waiting for a request to fail, e.g. after a failed startup ping.
    pub fn mark_primary_down(&self, op: &str, reason: &str) {
        tracing::warn!(
            "Document store unavailable during {op}, using local storage for {}s: {reason}",
            self.retry_after.as_secs()
        );
        if let Ok(mut down_until) = self.down_until.lock() {
            *down_until = Some(Instant::now() + self.retry_after);
        }
    }

    fn active_primary(&self) -> Option<&Arc<dyn Store>> {
        let primary = self.primary.as_ref()?;

        let Ok(mut down_until) = self.down_until.lock() else {
            return Some(primary);
        };
        match *down_until {
            Some(until) if Instant::now() < until => None,
            Some(_) => {
                *down_until = None;
                tracing::info!("Retrying document store");
                Some(primary)
            }
            None => Some(primary),
        }
    }
}

#[async_trait]
impl Store for FallbackStore {
    fn backend(&self) -> &'static str {
        self.mode()
    }

    async fn insert_user(&self, user: entity::user::Model) -> Result<User, StoreError> {
        with_fallback!(self, "insert_user", |store| store.insert_user(user.clone()))
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        with_fallback!(self, "find_user", |store| store.find_user(id))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        with_fallback!(self, "find_credentials", |store| store.find_credentials(email))
    }

    async fn find_users(&self, ids: &[String]) -> Result<Vec<User>, StoreError> {
        with_fallback!(self, "find_users", |store| store.find_users(ids))
    }

    async fn insert_book(&self, book: entity::book::Model) -> Result<Book, StoreError> {
        with_fallback!(self, "insert_book", |store| store.insert_book(book.clone()))
    }

    async fn find_book(&self, id: &str) -> Result<Option<Book>, StoreError> {
        with_fallback!(self, "find_book", |store| store.find_book(id))
    }

    async fn find_books(&self, ids: &[String]) -> Result<Vec<Book>, StoreError> {
        with_fallback!(self, "find_books", |store| store.find_books(ids))
    }

    async fn list_books(&self, query: &BookQuery) -> Result<(Vec<Book>, u64), StoreError> {
        with_fallback!(self, "list_books", |store| store.list_books(query))
    }

    async fn books_by_owner(&self, user_id: &str) -> Result<Vec<Book>, StoreError> {
        with_fallback!(self, "books_by_owner", |store| store.books_by_owner(user_id))
    }

    async fn update_book(
        &self,
        id: &str,
        fields: &BookFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Book>, StoreError> {
        with_fallback!(self, "update_book", |store| store.update_book(id, fields, now))
    }

    async fn delete_book(&self, id: &str) -> Result<bool, StoreError> {
        with_fallback!(self, "delete_book", |store| store.delete_book(id))
    }

    async fn insert_review(&self, review: entity::review::Model) -> Result<Review, StoreError> {
        with_fallback!(self, "insert_review", |store| store
            .insert_review(review.clone()))
    }

    async fn find_review(&self, id: &str) -> Result<Option<Review>, StoreError> {
        with_fallback!(self, "find_review", |store| store.find_review(id))
    }

    async fn find_user_review(
        &self,
        book_id: &str,
        user_id: &str,
    ) -> Result<Option<Review>, StoreError> {
        with_fallback!(self, "find_user_review", |store| store
            .find_user_review(book_id, user_id))
    }

    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError> {
        with_fallback!(self, "reviews_for_book", |store| store
            .reviews_for_book(book_id))
    }

    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        with_fallback!(self, "reviews_by_user", |store| store.reviews_by_user(user_id))
    }

    async fn update_review(
        &self,
        id: &str,
        fields: &ReviewFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Review>, StoreError> {
        with_fallback!(self, "update_review", |store| store
            .update_review(id, fields, now))
    }

    async fn delete_review(&self, id: &str) -> Result<bool, StoreError> {
        with_fallback!(self, "delete_review", |store| store.delete_review(id))
    }

    async fn delete_reviews_for_book(&self, book_id: &str) -> Result<u64, StoreError> {
        with_fallback!(self, "delete_reviews_for_book", |store| store
            .delete_reviews_for_book(book_id))
    }

    async fn refresh_rating(&self, book_id: &str) -> Result<Option<RatingSummary>, StoreError> {
        with_fallback!(self, "refresh_rating", |store| store.refresh_rating(book_id))
    }
}
