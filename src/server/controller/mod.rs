//! HTTP request handlers.
//!
//! Handlers authenticate through `AuthGuard`, turn request DTOs into validated parameters,
//! call a service, and wrap the resulting domain models in the response envelope.

pub mod auth;
pub mod book;
pub mod health;
pub mod review;
