//! Book domain models, parameters and listing queries.
//!
//! `BookQuery` and `BookSort` define listing semantics once. The local backend evaluates them
//! directly in memory with [`BookQuery::apply`]; the document-store backend translates the same
//! values into a filter and sort document.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use entity::genre::Genre;

use crate::{
    model::{
        book::{BookDto, BookInputDto, BookListQueryDto, PaginationDto},
        review::ReviewedBookDto,
    },
    server::{
        error::validation::ValidationErrors,
        model::{rating::RatingSummary, user::UserRef},
    },
};

pub const TITLE_MAX_LEN: usize = 200;
pub const AUTHOR_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const MIN_PUBLISHED_YEAR: i32 = 1000;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 5;
pub const MAX_LIMIT: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: Genre,
    pub published_year: i32,
    /// Id of the user who added the book.
    pub added_by: String,
    pub rating: RatingSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn from_entity(entity: entity::book::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            author: entity.author,
            description: entity.description,
            genre: entity.genre,
            published_year: entity.published_year,
            added_by: entity.added_by,
            rating: RatingSummary {
                average: entity.average_rating,
                total: entity.total_reviews,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn reference(&self) -> BookRef {
        BookRef {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.added_by == user_id
    }
}

/// A book with its owner's display name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BookWithOwner {
    pub book: Book,
    pub owner: UserRef,
}

impl BookWithOwner {
    pub fn into_dto(self) -> BookDto {
        let book = self.book;
        BookDto {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            genre: book.genre.as_str().to_string(),
            published_year: book.published_year,
            added_by: self.owner.into_added_by_dto(),
            average_rating: book.rating.average,
            total_reviews: book.rating.total,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Id, title and author of a book referenced by a review.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRef {
    pub id: String,
    pub title: String,
    pub author: String,
}

impl BookRef {
    /// Stand-in for a reviewed book that no longer exists.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "Unknown Book".to_string(),
            author: "Unknown Author".to_string(),
        }
    }

    pub fn into_dto(self) -> ReviewedBookDto {
        ReviewedBookDto {
            id: self.id,
            title: self.title,
            author: self.author,
        }
    }
}

/// Validated, user-editable book fields, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: Genre,
    pub published_year: i32,
}

impl BookFields {
    /// Trims and validates the request body.
    ///
    /// # Arguments
    /// - `dto` - Raw request body
    /// - `current_year` - Latest allowed publication year
    ///
    /// # Returns
    /// - `Ok(BookFields)` - All rules passed
    /// - `Err(ValidationErrors)` - One entry per failed field
    pub fn from_dto(dto: BookInputDto, current_year: i32) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = trimmed_within(&mut errors, "title", "Title", &dto.title, TITLE_MAX_LEN);
        let author = trimmed_within(&mut errors, "author", "Author", &dto.author, AUTHOR_MAX_LEN);
        let description = trimmed_within(
            &mut errors,
            "description",
            "Description",
            &dto.description,
            DESCRIPTION_MAX_LEN,
        );

        let genre = dto.genre.parse::<Genre>().ok();
        if genre.is_none() {
            errors.push("genre", "Please select a valid genre");
        }

        let published_year = dto
            .published_year
            .filter(|year| (i64::from(MIN_PUBLISHED_YEAR)..=i64::from(current_year)).contains(year))
            .and_then(|year| i32::try_from(year).ok());
        if published_year.is_none() {
            errors.push("publishedYear", "Please enter a valid year");
        }

        match (genre, published_year) {
            (Some(genre), Some(published_year)) if errors.is_empty() => Ok(Self {
                title,
                author,
                description,
                genre,
                published_year,
            }),
            _ => Err(errors),
        }
    }

    /// Builds the document for a newly added book with an empty rating aggregate.
    pub fn into_entity(
        self,
        id: String,
        added_by: String,
        now: DateTime<Utc>,
    ) -> entity::book::Model {
        entity::book::Model {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            genre: self.genre,
            published_year: self.published_year,
            added_by,
            average_rating: 0.0,
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

fn trimmed_within(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &str,
    max: usize,
) -> String {
    let value = value.trim().to_string();
    let len = value.chars().count();
    if len == 0 || len > max {
        errors.push(field, format!("{label} must be between 1 and {max} characters"));
    }
    value
}

/// Listing order. Ties always fall back to newest first, then id descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSort {
    #[default]
    Newest,
    YearDesc,
    YearAsc,
    RatingDesc,
    RatingAsc,
}

impl BookSort {
    /// Unrecognised values mean newest first.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("year_desc") => Self::YearDesc,
            Some("year_asc") => Self::YearAsc,
            Some("rating_desc") => Self::RatingDesc,
            Some("rating_asc") => Self::RatingAsc,
            _ => Self::Newest,
        }
    }

    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let primary = match self {
            Self::Newest => Ordering::Equal,
            Self::YearDesc => b.published_year.cmp(&a.published_year),
            Self::YearAsc => a.published_year.cmp(&b.published_year),
            Self::RatingDesc => b.rating.average.total_cmp(&a.rating.average),
            Self::RatingAsc => a.rating.average.total_cmp(&b.rating.average),
        };

        primary
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    }
}

/// A parsed book listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    /// Lower-cased search term; matches title or author.
    pub search: Option<String>,
    pub genre: Option<Genre>,
    pub sort: BookSort,
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            search: None,
            genre: None,
            sort: BookSort::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl BookQuery {
    /// Parses the raw query string values.
    ///
    /// Page and limit fall back to their defaults when missing, unparsable or not positive;
    /// limit is capped at [`MAX_LIMIT`]. A genre of `all` (or empty) disables the filter.
    ///
    /// # Returns
    /// - `Ok(BookQuery)` - Parsed query
    /// - `Err(ValidationErrors)` - Genre is not one of the known genres
    pub fn from_dto(dto: BookListQueryDto) -> Result<Self, ValidationErrors> {
        let page = parse_positive(dto.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(dto.limit.as_deref())
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);

        let search = dto
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut errors = ValidationErrors::new();
        let genre = match dto.genre.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(name) => match name.parse::<Genre>() {
                Ok(genre) => Some(genre),
                Err(_) => {
                    errors.push("genre", "Please select a valid genre");
                    None
                }
            },
        };

        errors.into_result(Self {
            search,
            genre,
            sort: BookSort::parse(dto.sort.as_deref()),
            page,
            limit,
        })
    }

    /// Number of matching books before the requested page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn matches(&self, book: &Book) -> bool {
        let search_ok = self.search.as_ref().map_or(true, |term| {
            book.title.to_lowercase().contains(term) || book.author.to_lowercase().contains(term)
        });
        let genre_ok = self.genre.map_or(true, |genre| book.genre == genre);

        search_ok && genre_ok
    }

    /// Filters, sorts and pages an in-memory collection.
    ///
    /// # Returns
    /// - `(page, total)` - The requested page and the number of books matching the filter
    pub fn apply(&self, books: impl IntoIterator<Item = Book>) -> (Vec<Book>, u64) {
        let mut matching: Vec<Book> = books.into_iter().filter(|b| self.matches(b)).collect();
        matching.sort_by(|a, b| self.sort.compare(a, b));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(self.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect();

        (page, total)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}

/// One page of a book listing.
#[derive(Debug, Clone, PartialEq)]
pub struct BookPage {
    pub books: Vec<BookWithOwner>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl BookPage {
    pub fn pagination(&self) -> PaginationDto {
        let total_pages = self.total.div_ceil(self.limit.max(1));
        PaginationDto {
            current_page: self.page,
            total_pages,
            total_books: self.total,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixture;

    fn catalogue() -> Vec<Book> {
        fixture::book::catalogue("owner")
            .into_iter()
            .map(Book::from_entity)
            .collect()
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    fn input() -> BookInputDto {
        BookInputDto {
            title: "  Dune ".to_string(),
            author: "Frank Herbert".to_string(),
            description: "Spice.".to_string(),
            genre: "Science Fiction".to_string(),
            published_year: Some(1965),
        }
    }

    #[test]
    fn trims_valid_book_fields() {
        let fields = BookFields::from_dto(input(), 2024).unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.genre, Genre::ScienceFiction);
        assert_eq!(fields.published_year, 1965);
    }

    #[test]
    fn rejects_future_and_ancient_years() {
        for year in [Some(999), Some(2025), None] {
            let dto = BookInputDto {
                published_year: year,
                ..input()
            };
            let errors = BookFields::from_dto(dto, 2024).unwrap_err();
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["publishedYear"]);
        }
    }

    #[test]
    fn rejects_unknown_genre_and_overlong_title() {
        let dto = BookInputDto {
            title: "x".repeat(TITLE_MAX_LEN + 1),
            genre: "Poetry".to_string(),
            ..input()
        };
        let errors = BookFields::from_dto(dto, 2024).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["title", "genre"]);
    }

    #[test]
    fn query_defaults_for_missing_or_garbage_values() {
        let query = BookQuery::from_dto(BookListQueryDto {
            page: Some("abc".to_string()),
            limit: Some("0".to_string()),
            genre: Some("all".to_string()),
            sort: Some("sideways".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(query, BookQuery::default());
    }

    #[test]
    fn query_caps_limit_and_rejects_unknown_genre() {
        let query = BookQuery::from_dto(BookListQueryDto {
            limit: Some("5000".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.limit, MAX_LIMIT);

        assert!(BookQuery::from_dto(BookListQueryDto {
            genre: Some("Poetry".to_string()),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn default_order_is_newest_first() {
        let (page, total) = BookQuery {
            limit: 10,
            ..Default::default()
        }
        .apply(catalogue());

        assert_eq!(total, 6);
        assert_eq!(
            titles(&page),
            vec![
                "The Name of the Wind",
                "Sapiens",
                "Foundation",
                "Gone Girl",
                "The Hobbit",
                "Dune"
            ]
        );
    }

    #[test]
    fn rating_ties_fall_back_to_newest() {
        let (page, _) = BookQuery {
            sort: BookSort::RatingDesc,
            limit: 3,
            ..Default::default()
        }
        .apply(catalogue());

        assert_eq!(titles(&page), vec!["The Hobbit", "The Name of the Wind", "Dune"]);
    }

    #[test]
    fn search_matches_title_or_author_case_insensitively() {
        let (page, total) = BookQuery {
            search: Some("ASIMOV".to_lowercase()),
            ..Default::default()
        }
        .apply(catalogue());
        assert_eq!(total, 1);
        assert_eq!(titles(&page), vec!["Foundation"]);

        let (_, total) = BookQuery {
            search: Some("the".to_string()),
            ..Default::default()
        }
        .apply(catalogue());
        assert_eq!(total, 2);
    }

    #[test]
    fn genre_filter_and_year_sort_combine() {
        let (page, total) = BookQuery {
            genre: Some(Genre::ScienceFiction),
            sort: BookSort::YearAsc,
            ..Default::default()
        }
        .apply(catalogue());

        assert_eq!(total, 2);
        assert_eq!(titles(&page), vec!["Foundation", "Dune"]);
    }

    #[test]
    fn pages_past_the_end_are_empty_but_counted() {
        let (page, total) = BookQuery {
            page: 3,
            limit: 5,
            ..Default::default()
        }
        .apply(catalogue());

        assert!(page.is_empty());
        assert_eq!(total, 6);
    }

    #[test]
    fn pagination_metadata() {
        let page = BookPage {
            books: Vec::new(),
            total: 6,
            page: 1,
            limit: 5,
        };
        assert_eq!(
            page.pagination(),
            PaginationDto {
                current_page: 1,
                total_pages: 2,
                total_books: 6,
                has_next: true,
                has_prev: false,
            }
        );

        let empty = BookPage {
            books: Vec::new(),
            total: 0,
            page: 1,
            limit: 5,
        };
        assert_eq!(empty.pagination().total_pages, 0);
        assert!(!empty.pagination().has_next);
    }
}
