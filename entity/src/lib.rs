//! Persisted document models shared by every storage backend.
//!
//! The same structs are written to the document store and to the local JSON files, so the field
//! names here are the on-disk/on-wire names of each collection. Timestamps are stored as UTC
//! milliseconds so that both backends can order them numerically.

pub mod book;
pub mod genre;
pub mod review;
pub mod user;

/// Collection names, used as document-store collection names and as local file stems.
pub mod collection {
    pub const USERS: &str = "users";
    pub const BOOKS: &str = "books";
    pub const REVIEWS: &str = "reviews";
}

pub mod prelude {
    pub use crate::book::Model as Book;
    pub use crate::genre::Genre;
    pub use crate::review::Model as Review;
    pub use crate::user::Model as User;
}
