use std::collections::{HashMap, HashSet};

use crate::server::{
    data::{Store, DUPLICATE_REVIEW},
    error::{auth::AuthError, AppError},
    model::{
        book::BookRef,
        review::{Review, ReviewFields, ReviewWithBook, ReviewWithUser},
        user::{User, UserRef},
    },
    util::{id::new_id, time},
};

pub struct ReviewService<'a> {
    store: &'a dyn Store,
}

impl<'a> ReviewService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Reviews of a book, newest first, with reviewer names resolved.
    ///
    /// An unknown book simply has no reviews.
    pub async fn for_book(&self, book_id: &str) -> Result<Vec<ReviewWithUser>, AppError> {
        let reviews = self.store.reviews_for_book(book_id).await?;

        let ids = unique(reviews.iter().map(|r| &r.user));
        let users: HashMap<String, UserRef> = self
            .store
            .find_users(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u.reference()))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|review| {
                let user = users
                    .get(&review.user)
                    .cloned()
                    .unwrap_or_else(|| UserRef::unknown(&review.user));
                ReviewWithUser { review, user }
            })
            .collect())
    }

    /// The user's reviews, newest first, with book titles resolved.
    pub async fn written_by(&self, user: &User) -> Result<Vec<ReviewWithBook>, AppError> {
        let reviews = self.store.reviews_by_user(&user.id).await?;

        let ids = unique(reviews.iter().map(|r| &r.book));
        let books: HashMap<String, BookRef> = self
            .store
            .find_books(&ids)
            .await?
            .into_iter()
            .map(|b| (b.id.clone(), b.reference()))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|review| {
                let book = books
                    .get(&review.book)
                    .cloned()
                    .unwrap_or_else(|| BookRef::unknown(&review.book));
                ReviewWithBook { review, book }
            })
            .collect())
    }

    /// Adds the user's review of a book and refreshes the book's rating.
    ///
    /// # Returns
    /// - `Ok(ReviewWithUser)` - The stored review
    /// - `Err(AppError::NotFound)` - No such book
    /// - `Err(AppError::BadRequest)` - The user already reviewed this book
    pub async fn create(
        &self,
        user: &User,
        book_id: &str,
        fields: ReviewFields,
    ) -> Result<ReviewWithUser, AppError> {
        if self.store.find_book(book_id).await?.is_none() {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        if self
            .store
            .find_user_review(book_id, &user.id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(DUPLICATE_REVIEW.to_string()));
        }

        let entity = fields.into_entity(
            new_id(),
            book_id.to_string(),
            user.id.clone(),
            time::now(),
        );
        let review = self.store.insert_review(entity).await?;
        self.refresh_rating(book_id).await?;

        Ok(ReviewWithUser {
            review,
            user: user.reference(),
        })
    }

    /// Changes the rating and text of the user's own review.
    pub async fn update(
        &self,
        user: &User,
        id: &str,
        fields: ReviewFields,
    ) -> Result<ReviewWithUser, AppError> {
        let review = self.find(id).await?;
        ensure_author(&review, user, "update this review")?;

        let review = self
            .store
            .update_review(id, &fields, time::now())
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
        self.refresh_rating(&review.book).await?;

        Ok(ReviewWithUser {
            review,
            user: user.reference(),
        })
    }

    /// Deletes the user's own review.
    pub async fn delete(&self, user: &User, id: &str) -> Result<(), AppError> {
        let review = self.find(id).await?;
        ensure_author(&review, user, "delete this review")?;

        if !self.store.delete_review(id).await? {
            return Err(AppError::OperationFailed(
                "Failed to delete review".to_string(),
            ));
        }
        self.refresh_rating(&review.book).await?;

        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Review, AppError> {
        self.store
            .find_review(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    async fn refresh_rating(&self, book_id: &str) -> Result<(), AppError> {
        match self.store.refresh_rating(book_id).await? {
            Some(summary) => tracing::debug!(
                "Book {book_id} rated {} from {} reviews",
                summary.average,
                summary.total
            ),
            None => tracing::warn!("Reviewed book {book_id} no longer exists"),
        }
        Ok(())
    }
}

fn unique<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    ids.cloned()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

fn ensure_author(review: &Review, user: &User, action: &'static str) -> Result<(), AuthError> {
    if review.is_written_by(&user.id) {
        Ok(())
    } else {
        Err(AuthError::NotOwner {
            user_id: user.id.clone(),
            action,
        })
    }
}

#[cfg(test)]
mod test;
