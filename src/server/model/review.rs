//! Review domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::review::{ReviewDto, ReviewInputDto, UserReviewDto},
    server::{
        error::validation::ValidationErrors,
        model::{book::BookRef, user::UserRef},
    },
};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const REVIEW_TEXT_MAX_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub book: String,
    pub user: String,
    pub rating: i32,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::review::Model) -> Self {
        Self {
            id: entity.id,
            book: entity.book,
            user: entity.user,
            rating: entity.rating,
            review_text: entity.review_text,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_written_by(&self, user_id: &str) -> bool {
        self.user == user_id
    }
}

/// Validated rating and text, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFields {
    pub rating: i32,
    pub review_text: String,
}

impl ReviewFields {
    pub fn from_dto(dto: ReviewInputDto) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let rating = dto
            .rating
            .and_then(|r| i32::try_from(r).ok())
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r));
        if rating.is_none() {
            errors.push(
                "rating",
                format!("Rating must be between {MIN_RATING} and {MAX_RATING}"),
            );
        }

        let review_text = dto.review_text.trim().to_string();
        let len = review_text.chars().count();
        if len == 0 || len > REVIEW_TEXT_MAX_LEN {
            errors.push(
                "reviewText",
                format!("Review must be between 1 and {REVIEW_TEXT_MAX_LEN} characters"),
            );
        }

        match rating {
            Some(rating) if errors.is_empty() => Ok(Self {
                rating,
                review_text,
            }),
            _ => Err(errors),
        }
    }

    pub fn into_entity(
        self,
        id: String,
        book_id: String,
        user_id: String,
        now: DateTime<Utc>,
    ) -> entity::review::Model {
        entity::review::Model {
            id,
            book: book_id,
            user: user_id,
            rating: self.rating,
            review_text: self.review_text,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A review listed under its book.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithUser {
    pub review: Review,
    pub user: UserRef,
}

impl ReviewWithUser {
    pub fn into_dto(self) -> ReviewDto {
        let review = self.review;
        ReviewDto {
            id: review.id,
            book: review.book,
            user: self.user.into_reviewer_dto(),
            rating: review.rating,
            review_text: review.review_text,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// A review listed for its author.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithBook {
    pub review: Review,
    pub book: BookRef,
}

impl ReviewWithBook {
    pub fn into_dto(self) -> UserReviewDto {
        let review = self.review;
        UserReviewDto {
            id: review.id,
            book: self.book.into_dto(),
            user: review.user,
            rating: review.rating,
            review_text: review.review_text,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rating: Option<i64>, text: &str) -> ReviewInputDto {
        ReviewInputDto {
            rating,
            review_text: text.to_string(),
        }
    }

    #[test]
    fn accepts_boundary_ratings() {
        for rating in [1, 5] {
            let fields = ReviewFields::from_dto(input(Some(rating), " Fine. ")).unwrap();
            assert_eq!(fields.rating, rating as i32);
            assert_eq!(fields.review_text, "Fine.");
        }
    }

    #[test]
    fn rejects_out_of_range_or_missing_rating() {
        for rating in [None, Some(0), Some(6), Some(i64::MAX)] {
            let errors = ReviewFields::from_dto(input(rating, "Fine.")).unwrap_err();
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["rating"]);
        }
    }

    #[test]
    fn rejects_blank_or_overlong_text() {
        let errors = ReviewFields::from_dto(input(Some(3), "   ")).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["reviewText"]);

        let long = "a".repeat(REVIEW_TEXT_MAX_LEN + 1);
        assert!(ReviewFields::from_dto(input(Some(3), &long)).is_err());

        let exact = "a".repeat(REVIEW_TEXT_MAX_LEN);
        assert!(ReviewFields::from_dto(input(Some(3), &exact)).is_ok());
    }

    #[test]
    fn missing_author_renders_as_unknown() {
        let review = Review::from_entity(test_utils::fixture::review::entity("book", "gone"));
        let dto = ReviewWithUser {
            review,
            user: UserRef::unknown("gone"),
        }
        .into_dto();

        assert_eq!(dto.user.name, "Unknown User");
        assert_eq!(dto.user.id, "gone");
    }
}
