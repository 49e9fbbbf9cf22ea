//! Request and response DTOs of the JSON API.
//!
//! Field names follow the wire format the web client expects: camelCase with `_id` for
//! identifiers, every response wrapped in a `success` envelope.

pub mod api;
pub mod book;
pub mod review;
pub mod user;
