//! Server-side domain models and parameter types.
//!
//! Domain models are converted from stored documents at the storage boundary and transformed
//! to DTOs at the controller boundary. Parameter types carry request input that has already
//! passed validation.

pub mod book;
pub mod rating;
pub mod review;
pub mod user;
