//! Aggregate rating of a book.

/// A book's average review score and review count.
///
/// The average is always rounded half-up to one decimal place; a book without reviews has an
/// average of 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: f64,
    pub total: i64,
}

impl RatingSummary {
    /// Aggregates individual review ratings.
    pub fn from_ratings(ratings: impl IntoIterator<Item = i32>) -> Self {
        let (sum, total) = ratings
            .into_iter()
            .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r), count + 1));

        if total == 0 {
            return Self::default();
        }

        Self::from_average(sum as f64 / total as f64, total)
    }

    /// Builds a summary from an average computed elsewhere (e.g. by the document store).
    pub fn from_average(average: f64, total: i64) -> Self {
        if total <= 0 {
            return Self::default();
        }

        Self {
            average: (average * 10.0).round() / 10.0,
            total,
        }
    }
}
