//! Flat-file JSON backend.
//!
//! Each collection is a pretty-printed JSON array in `<data_dir>/<collection>.json`. Reads load
//! the whole file; writes hold a single lock for the read-modify-write cycle and replace the file
//! by writing a temporary sibling and renaming it over the original, so a reader never sees a
//! partially written file.
//!
//! Listing semantics come from [`BookQuery::apply`], which is the same definition the document
//! store's filters are built from.

use std::{
    cmp::Reverse,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use entity::collection;

use crate::server::{
    data::{error::StoreError, Store, DUPLICATE_EMAIL, DUPLICATE_REVIEW},
    model::{
        book::{Book, BookFields, BookQuery},
        rating::RatingSummary,
        review::{Review, ReviewFields},
        user::{User, UserCredentials},
    },
};

#[cfg(test)]
mod test;

pub struct LocalStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Opens the store in `dir`, creating the directory and any missing collection file.
    ///
    /// Existing files are left untouched.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let store = Self {
            dir,
            write_lock: Mutex::new(()),
        };

        for name in [collection::USERS, collection::BOOKS, collection::REVIEWS] {
            let path = store.path(name);
            if !tokio::fs::try_exists(&path).await? {
                tokio::fs::write(&path, "[]").await?;
                tracing::debug!("Created {}", path.display());
            }
        }

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Reads every document of a collection. A missing file reads as empty; a corrupt file is an
    /// error.
    async fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        match tokio::fs::read(self.path(name)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces a collection file. Callers must hold `write_lock`.
    async fn save<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(items)?;
        let path = self.path(name);
        let tmp = self.dir.join(format!(".{name}.json.tmp"));

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Runs a read-modify-write cycle on one collection under the write lock.
    ///
    /// The file is only rewritten when `f` reports a change.
    async fn modify<T, R, F>(&self, name: &str, f: F) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned + Send,
        R: Send,
        F: FnOnce(&mut Vec<T>) -> Result<(R, bool), StoreError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load::<T>(name).await?;
        let (result, changed) = f(&mut items)?;
        if changed {
            self.save(name, &items).await?;
        }
        Ok(result)
    }

    async fn users(&self) -> Result<Vec<entity::user::Model>, StoreError> {
        self.load(collection::USERS).await
    }

    async fn books(&self) -> Result<Vec<entity::book::Model>, StoreError> {
        self.load(collection::BOOKS).await
    }

    async fn reviews(&self) -> Result<Vec<entity::review::Model>, StoreError> {
        self.load(collection::REVIEWS).await
    }

    async fn reviews_where(
        &self,
        pred: impl Fn(&entity::review::Model) -> bool,
    ) -> Result<Vec<Review>, StoreError> {
        let mut reviews: Vec<_> = self.reviews().await?.into_iter().filter(pred).collect();
        reviews.sort_by_key(|r| Reverse((r.created_at, r.id.clone())));
        Ok(reviews.into_iter().map(Review::from_entity).collect())
    }
}

#[async_trait]
impl Store for LocalStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn insert_user(&self, user: entity::user::Model) -> Result<User, StoreError> {
        let user = self
            .modify(collection::USERS, |users: &mut Vec<entity::user::Model>| {
                if users.iter().any(|u| u.email == user.email) {
                    return Err(StoreError::Conflict(DUPLICATE_EMAIL.to_string()));
                }
                users.push(user.clone());
                Ok((user, true))
            })
            .await?;
        Ok(User::from_entity(user))
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = self.users().await?.into_iter().find(|u| u.id == id);
        Ok(user.map(User::from_entity))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        let user = self.users().await?.into_iter().find(|u| u.email == email);
        Ok(user.map(UserCredentials::from_entity))
    }

    async fn find_users(&self, ids: &[String]) -> Result<Vec<User>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .users()
            .await?
            .into_iter()
            .filter(|u| ids.contains(&u.id))
            .map(User::from_entity)
            .collect())
    }

    async fn insert_book(&self, book: entity::book::Model) -> Result<Book, StoreError> {
        let book = self
            .modify(collection::BOOKS, |books: &mut Vec<entity::book::Model>| {
                books.push(book.clone());
                Ok((book, true))
            })
            .await?;
        Ok(Book::from_entity(book))
    }

    async fn find_book(&self, id: &str) -> Result<Option<Book>, StoreError> {
        let book = self.books().await?.into_iter().find(|b| b.id == id);
        Ok(book.map(Book::from_entity))
    }

    async fn find_books(&self, ids: &[String]) -> Result<Vec<Book>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .books()
            .await?
            .into_iter()
            .filter(|b| ids.contains(&b.id))
            .map(Book::from_entity)
            .collect())
    }

    async fn list_books(&self, query: &BookQuery) -> Result<(Vec<Book>, u64), StoreError> {
        let books = self.books().await?.into_iter().map(Book::from_entity);
        Ok(query.apply(books))
    }

    async fn books_by_owner(&self, user_id: &str) -> Result<Vec<Book>, StoreError> {
        let mut books: Vec<_> = self
            .books()
            .await?
            .into_iter()
            .filter(|b| b.added_by == user_id)
            .collect();
        books.sort_by_key(|b| Reverse((b.created_at, b.id.clone())));
        Ok(books.into_iter().map(Book::from_entity).collect())
    }

    async fn update_book(
        &self,
        id: &str,
        fields: &BookFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Book>, StoreError> {
        let book = self
            .modify(collection::BOOKS, |books: &mut Vec<entity::book::Model>| {
                let Some(book) = books.iter_mut().find(|b| b.id == id) else {
                    return Ok((None, false));
                };
                book.title = fields.title.clone();
                book.author = fields.author.clone();
                book.description = fields.description.clone();
                book.genre = fields.genre;
                book.published_year = fields.published_year;
                book.updated_at = now;
                Ok((Some(book.clone()), true))
            })
            .await?;
        Ok(book.map(Book::from_entity))
    }

    async fn delete_book(&self, id: &str) -> Result<bool, StoreError> {
        self.modify(collection::BOOKS, |books: &mut Vec<entity::book::Model>| {
            let before = books.len();
            books.retain(|b| b.id != id);
            let removed = books.len() < before;
            Ok((removed, removed))
        })
        .await
    }

    async fn insert_review(&self, review: entity::review::Model) -> Result<Review, StoreError> {
        let review = self
            .modify(collection::REVIEWS, |reviews: &mut Vec<entity::review::Model>| {
                if reviews
                    .iter()
                    .any(|r| r.book == review.book && r.user == review.user)
                {
                    return Err(StoreError::Conflict(DUPLICATE_REVIEW.to_string()));
                }
                reviews.push(review.clone());
                Ok((review, true))
            })
            .await?;
        Ok(Review::from_entity(review))
    }

    async fn find_review(&self, id: &str) -> Result<Option<Review>, StoreError> {
        let review = self.reviews().await?.into_iter().find(|r| r.id == id);
        Ok(review.map(Review::from_entity))
    }

    async fn find_user_review(
        &self,
        book_id: &str,
        user_id: &str,
    ) -> Result<Option<Review>, StoreError> {
        let review = self
            .reviews()
            .await?
            .into_iter()
            .find(|r| r.book == book_id && r.user == user_id);
        Ok(review.map(Review::from_entity))
    }

    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError> {
        self.reviews_where(|r| r.book == book_id).await
    }

    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        self.reviews_where(|r| r.user == user_id).await
    }

    async fn update_review(
        &self,
        id: &str,
        fields: &ReviewFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Review>, StoreError> {
        let review = self
            .modify(collection::REVIEWS, |reviews: &mut Vec<entity::review::Model>| {
                let Some(review) = reviews.iter_mut().find(|r| r.id == id) else {
                    return Ok((None, false));
                };
                review.rating = fields.rating;
                review.review_text = fields.review_text.clone();
                review.updated_at = now;
                Ok((Some(review.clone()), true))
            })
            .await?;
        Ok(review.map(Review::from_entity))
    }

    async fn delete_review(&self, id: &str) -> Result<bool, StoreError> {
        self.modify(collection::REVIEWS, |reviews: &mut Vec<entity::review::Model>| {
            let before = reviews.len();
            reviews.retain(|r| r.id != id);
            let removed = reviews.len() < before;
            Ok((removed, removed))
        })
        .await
    }

    async fn delete_reviews_for_book(&self, book_id: &str) -> Result<u64, StoreError> {
        self.modify(collection::REVIEWS, |reviews: &mut Vec<entity::review::Model>| {
            let before = reviews.len();
            reviews.retain(|r| r.book != book_id);
            let removed = (before - reviews.len()) as u64;
            Ok((removed, removed > 0))
        })
        .await
    }

    async fn refresh_rating(&self, book_id: &str) -> Result<Option<RatingSummary>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let summary = RatingSummary::from_ratings(
            self.reviews()
                .await?
                .iter()
                .filter(|r| r.book == book_id)
                .map(|r| r.rating),
        );

        let mut books = self.books().await?;
        let Some(book) = books.iter_mut().find(|b| b.id == book_id) else {
            return Ok(None);
        };
        book.average_rating = summary.average;
        book.total_reviews = summary.total;
        self.save(collection::BOOKS, &books).await?;

        Ok(Some(summary))
    }
}
