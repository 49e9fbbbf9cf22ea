//! Factory methods for creating test documents.
//!
//! Factories create documents with unique ids and sensible defaults and insert them into a
//! [`TestContext`](crate::context::TestContext) collection file. Each document type has a
//! `Factory` builder for customisation and a `create_*` shorthand for the defaults.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(&test)
//!     .email("ada@example.com")
//!     .password("secret123")
//!     .build()?;
//! let book = factory::book::create_book(&test, &user.id)?;
//! let review = factory::review::ReviewFactory::new(&test, &book.id, &user.id)
//!     .rating(5)
//!     .build()?;
//! ```

pub mod book;
pub mod helpers;
pub mod review;
pub mod user;
