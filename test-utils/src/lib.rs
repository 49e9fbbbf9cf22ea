//! Bookshelf Test Utils
//!
//! Provides shared testing utilities for the bookshelf application. Tests get an isolated,
//! temporary data directory laid out exactly like the local JSON storage backend expects, seeded
//! with whatever users, books and reviews the test needs.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for seeding a test data directory
//! - **TestContext**: The built environment (temporary directory plus seeded collections)
//! - **factory**: Builders that create documents with unique ids and insert them into a context
//! - **fixture**: In-memory documents with fixed values, nothing is written
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn lists_books() -> Result<(), TestError> {
//!     let test = TestBuilder::new().build()?;
//!     let owner = factory::user::create_user(&test)?;
//!     factory::book::BookFactory::new(&test, &owner.id).title("Dune").build()?;
//!
//!     let store = LocalStore::open(test.data_dir()).await?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
