//! Book fixtures.

use entity::{book, genre::Genre};

use crate::fixture::{fixed_id, timestamp};

/// Creates a book document with default values owned by `owner_id`.
///
/// # Default Values
/// - id: `fixed_id(100)`
/// - title: `"Dune"`, author: `"Frank Herbert"`
/// - genre: Science Fiction, published 1965
/// - no reviews
pub fn entity(owner_id: &str) -> book::Model {
    book::Model {
        id: fixed_id(100),
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        description: "A desert planet and the spice that binds an empire.".to_string(),
        genre: Genre::ScienceFiction,
        published_year: 1965,
        added_by: owner_id.to_string(),
        average_rating: 0.0,
        total_reviews: 0,
        created_at: timestamp(1),
        updated_at: timestamp(1),
    }
}

/// Six books with varied genres, years and ratings, created one minute apart in this order:
///
/// | # | title | genre | year | rating |
/// |---|---|---|---|---|
/// | 1 | Dune | Science Fiction | 1965 | 4.5 |
/// | 2 | The Hobbit | Fantasy | 1937 | 4.8 |
/// | 3 | Gone Girl | Thriller | 2012 | 3.9 |
/// | 4 | Foundation | Science Fiction | 1951 | 4.1 |
/// | 5 | Sapiens | History | 2011 | 0.0 |
/// | 6 | The Name of the Wind | Fantasy | 2007 | 4.5 |
pub fn catalogue(owner_id: &str) -> Vec<book::Model> {
    let rows = [
        ("Dune", "Frank Herbert", Genre::ScienceFiction, 1965, 4.5, 2),
        ("The Hobbit", "J.R.R. Tolkien", Genre::Fantasy, 1937, 4.8, 5),
        ("Gone Girl", "Gillian Flynn", Genre::Thriller, 2012, 3.9, 7),
        ("Foundation", "Isaac Asimov", Genre::ScienceFiction, 1951, 4.1, 3),
        ("Sapiens", "Yuval Noah Harari", Genre::History, 2011, 0.0, 0),
        ("The Name of the Wind", "Patrick Rothfuss", Genre::Fantasy, 2007, 4.5, 4),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (title, author, genre, year, rating, reviews))| {
            let n = i as u64 + 1;
            book::Model {
                id: fixed_id(100 + n),
                title: title.to_string(),
                author: author.to_string(),
                description: format!("{title} by {author}."),
                genre,
                published_year: year,
                added_by: owner_id.to_string(),
                average_rating: rating,
                total_reviews: reviews,
                created_at: timestamp(n as i64),
                updated_at: timestamp(n as i64),
            }
        })
        .collect()
}
