//! Test fixtures providing reusable documents without touching the filesystem.
//!
//! Fixtures have fixed ids and timestamps, which makes them suitable for asserting on exact
//! ordering. Use the factories when a test needs unique documents inserted into a context.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let owner = fixture::user::entity();
//! let books = fixture::book::catalogue(&owner.id);
//! ```

use chrono::{DateTime, Duration, Utc};

pub mod book;
pub mod review;
pub mod user;

/// Base instant every fixture timestamp is derived from (2024-01-01T00:00:00Z).
pub const EPOCH_MILLIS: i64 = 1_704_067_200_000;

/// Fixture timestamp `minutes` after [`EPOCH_MILLIS`].
pub fn timestamp(minutes: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(EPOCH_MILLIS).unwrap_or_default() + Duration::minutes(minutes)
}

/// Deterministic 24-digit hex id for fixture documents.
pub fn fixed_id(n: u64) -> String {
    format!("{n:024x}")
}
