//! MongoDB document-store backend.

pub mod query;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};
use tokio::sync::OnceCell;

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

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoStore {
    db: Database,
    indexes: OnceCell<()>,
}

impl MongoStore {
    /// Builds a client for `uri`. The driver connects lazily, so this does not contact the server.
    ///
    /// # Arguments
    /// - `uri` - Connection string
    /// - `database` - Database holding the collections
    /// - `timeout` - How long an operation waits for a reachable server
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await.map_err(map_error)?;
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options).map_err(map_error)?;

        Ok(Self {
            db: client.database(database),
            indexes: OnceCell::new(),
        })
    }

    /// Round-trips a `ping` command to check the server is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_error)?;
        Ok(())
    }

    fn users(&self) -> Collection<entity::user::Model> {
        self.db.collection(collection::USERS)
    }

    fn books(&self) -> Collection<entity::book::Model> {
        self.db.collection(collection::BOOKS)
    }

    fn reviews(&self) -> Collection<entity::review::Model> {
        self.db.collection(collection::REVIEWS)
    }

    /// Creates the collection indexes on first use. A failed attempt is retried next time.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        self.indexes
            .get_or_try_init(|| async move {
                let unique = || IndexOptions::builder().unique(true).build();

                self.users()
                    .create_index(
                        IndexModel::builder()
                            .keys(doc! { "email": 1 })
                            .options(unique())
                            .build(),
                    )
                    .await
                    .map_err(map_error)?;
                self.reviews()
                    .create_index(
                        IndexModel::builder()
                            .keys(doc! { "book": 1, "user": 1 })
                            .options(unique())
                            .build(),
                    )
                    .await
                    .map_err(map_error)?;
                self.books()
                    .create_index(IndexModel::builder().keys(doc! { "createdAt": -1 }).build())
                    .await
                    .map_err(map_error)?;

                tracing::debug!("Document store indexes ensured");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Store for MongoStore {
    fn backend(&self) -> &'static str {
        "document"
    }

    async fn insert_user(&self, user: entity::user::Model) -> Result<User, StoreError> {
        self.ensure_indexes().await?;
        self.users()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_EMAIL))?;
        Ok(User::from_entity(user))
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.ensure_indexes().await?;
        let user = self
            .users()
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_error)?;
        Ok(user.map(User::from_entity))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        self.ensure_indexes().await?;
        let user = self
            .users()
            .find_one(doc! { "email": email })
            .await
            .map_err(map_error)?;
        Ok(user.map(UserCredentials::from_entity))
    }

    async fn find_users(&self, ids: &[String]) -> Result<Vec<User>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.ensure_indexes().await?;
        let users: Vec<_> = self
            .users()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(users.into_iter().map(User::from_entity).collect())
    }

    async fn insert_book(&self, book: entity::book::Model) -> Result<Book, StoreError> {
        self.ensure_indexes().await?;
        self.books().insert_one(&book).await.map_err(map_error)?;
        Ok(Book::from_entity(book))
    }

    async fn find_book(&self, id: &str) -> Result<Option<Book>, StoreError> {
        self.ensure_indexes().await?;
        let book = self
            .books()
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_error)?;
        Ok(book.map(Book::from_entity))
    }

    async fn find_books(&self, ids: &[String]) -> Result<Vec<Book>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.ensure_indexes().await?;
        let books: Vec<_> = self
            .books()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(books.into_iter().map(Book::from_entity).collect())
    }

    async fn list_books(&self, query: &BookQuery) -> Result<(Vec<Book>, u64), StoreError> {
        self.ensure_indexes().await?;
        let filter = query::book_filter(query);

        let total = self
            .books()
            .count_documents(filter.clone())
            .await
            .map_err(map_error)?;

        let Some(skip) = query::book_skip(query) else {
            return Ok((Vec::new(), total));
        };

        let books: Vec<_> = self
            .books()
            .find(filter)
            .sort(query::book_sort(query.sort))
            .skip(skip)
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;

        Ok((books.into_iter().map(Book::from_entity).collect(), total))
    }

    async fn books_by_owner(&self, user_id: &str) -> Result<Vec<Book>, StoreError> {
        self.ensure_indexes().await?;
        let books: Vec<_> = self
            .books()
            .find(doc! { "addedBy": user_id })
            .sort(query::newest_first())
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(books.into_iter().map(Book::from_entity).collect())
    }

    async fn update_book(
        &self,
        id: &str,
        fields: &BookFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Book>, StoreError> {
        self.ensure_indexes().await?;
        let update = doc! {
            "$set": {
                "title": fields.title.as_str(),
                "author": fields.author.as_str(),
                "description": fields.description.as_str(),
                "genre": fields.genre.as_str(),
                "publishedYear": fields.published_year,
                "updatedAt": now.timestamp_millis(),
            }
        };

        let book = self
            .books()
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_error)?;
        Ok(book.map(Book::from_entity))
    }

    async fn delete_book(&self, id: &str) -> Result<bool, StoreError> {
        self.ensure_indexes().await?;
        let result = self
            .books()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_review(&self, review: entity::review::Model) -> Result<Review, StoreError> {
        self.ensure_indexes().await?;
        self.reviews()
            .insert_one(&review)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_REVIEW))?;
        Ok(Review::from_entity(review))
    }

    async fn find_review(&self, id: &str) -> Result<Option<Review>, StoreError> {
        self.ensure_indexes().await?;
        let review = self
            .reviews()
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_error)?;
        Ok(review.map(Review::from_entity))
    }

    async fn find_user_review(
        &self,
        book_id: &str,
        user_id: &str,
    ) -> Result<Option<Review>, StoreError> {
        self.ensure_indexes().await?;
        let review = self
            .reviews()
            .find_one(doc! { "book": book_id, "user": user_id })
            .await
            .map_err(map_error)?;
        Ok(review.map(Review::from_entity))
    }

    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError> {
        self.find_reviews(doc! { "book": book_id }).await
    }

    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        self.find_reviews(doc! { "user": user_id }).await
    }

    async fn update_review(
        &self,
        id: &str,
        fields: &ReviewFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Review>, StoreError> {
        self.ensure_indexes().await?;
        let update = doc! {
            "$set": {
                "rating": fields.rating,
                "reviewText": fields.review_text.as_str(),
                "updatedAt": now.timestamp_millis(),
            }
        };

        let review = self
            .reviews()
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_error)?;
        Ok(review.map(Review::from_entity))
    }

    async fn delete_review(&self, id: &str) -> Result<bool, StoreError> {
        self.ensure_indexes().await?;
        let result = self
            .reviews()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_reviews_for_book(&self, book_id: &str) -> Result<u64, StoreError> {
        self.ensure_indexes().await?;
        let result = self
            .reviews()
            .delete_many(doc! { "book": book_id })
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count)
    }

    async fn refresh_rating(&self, book_id: &str) -> Result<Option<RatingSummary>, StoreError> {
        self.ensure_indexes().await?;
        let pipeline = vec![
            doc! { "$match": { "book": book_id } },
            doc! {
                "$group": {
                    "_id": Bson::Null,
                    "average": { "$avg": "$rating" },
                    "total": { "$sum": 1 },
                }
            },
        ];

        let groups: Vec<Document> = self
            .reviews()
            .aggregate(pipeline)
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;

        let summary = groups
            .first()
            .map(summary_from_group)
            .unwrap_or_default();

        let result = self
            .books()
            .update_one(
                doc! { "_id": book_id },
                doc! {
                    "$set": {
                        "averageRating": summary.average,
                        "totalReviews": summary.total,
                    }
                },
            )
            .await
            .map_err(map_error)?;

        Ok((result.matched_count > 0).then_some(summary))
    }
}

impl MongoStore {
    async fn find_reviews(&self, filter: Document) -> Result<Vec<Review>, StoreError> {
        self.ensure_indexes().await?;
        let reviews: Vec<_> = self
            .reviews()
            .find(filter)
            .sort(query::newest_first())
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(reviews.into_iter().map(Review::from_entity).collect())
    }
}

/// Reads the `$group` output of the rating pipeline.
fn summary_from_group(group: &Document) -> RatingSummary {
    let average = group.get_f64("average").unwrap_or(0.0);
    let total = match group.get("total") {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        _ => 0,
    };
    RatingSummary::from_average(average, total)
}

/// Classifies a driver error; unreachable-server failures become `Unavailable`.
fn map_error(err: mongodb::error::Error) -> StoreError {
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Mongo(Box::new(err)),
    }
}

/// Like [`map_error`], but duplicate-key failures become `Conflict(message)`.
fn map_write_error(err: mongodb::error::Error, message: &str) -> StoreError {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            StoreError::Conflict(message.to_string())
        }
        ErrorKind::Command(command) if command.code == DUPLICATE_KEY => {
            StoreError::Conflict(message.to_string())
        }
        _ => map_error(err),
    }
}
