//! Business logic between controllers and the storage layer.
//!
//! Services borrow the store for the duration of one request. They enforce ownership, resolve
//! the users and books that documents reference, and keep book ratings in step with reviews.

pub mod auth;
pub mod book;
pub mod review;
