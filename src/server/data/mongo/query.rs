//! Translation of listing queries into MongoDB filter and sort documents.

use mongodb::bson::{doc, Document};

use crate::server::model::book::{BookQuery, BookSort};

/// Filter matching the same books as [`BookQuery::matches`].
pub fn book_filter(query: &BookQuery) -> Document {
    let mut filter = Document::new();

    if let Some(search) = &query.search {
        let pattern = doc! { "$regex": regex::escape(search), "$options": "i" };
        filter.insert(
            "$or",
            vec![
                doc! { "title": pattern.clone() },
                doc! { "author": pattern },
            ],
        );
    }

    if let Some(genre) = query.genre {
        filter.insert("genre", genre.as_str());
    }

    filter
}

/// Sort document with the same tie-breaks as [`BookSort::compare`].
pub fn book_sort(sort: BookSort) -> Document {
    let mut order = match sort {
        BookSort::Newest => Document::new(),
        BookSort::YearDesc => doc! { "publishedYear": -1 },
        BookSort::YearAsc => doc! { "publishedYear": 1 },
        BookSort::RatingDesc => doc! { "averageRating": -1 },
        BookSort::RatingAsc => doc! { "averageRating": 1 },
    };
    order.insert("createdAt", -1);
    order.insert("_id", -1);
    order
}

/// Number of documents to skip for the requested page, or `None` when it is beyond anything
/// the server can address. Such a page is past the end of every collection.
pub fn book_skip(query: &BookQuery) -> Option<u64> {
    let skip = query.skip();
    i64::try_from(skip).ok().map(|_| skip)
}

/// Newest first, for review lists and a user's own books.
pub fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}
