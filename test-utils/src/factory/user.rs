//! User factory for creating test user documents.

use entity::{collection, user};

use crate::{
    context::TestContext,
    error::TestError,
    factory::helpers::{increasing_timestamp, next_id, unique_object_id},
};

/// Password every factory user gets unless overridden.
pub const DEFAULT_PASSWORD: &str = "password123";

/// bcrypt cost used for factory users; the minimum, to keep tests fast.
const TEST_BCRYPT_COST: u32 = 4;

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let user = UserFactory::new(&test)
///     .name("Ada")
///     .email("ada@example.com")
///     .build()?;
/// ```
pub struct UserFactory<'a> {
    context: &'a TestContext,
    name: String,
    email: String,
    password: String,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Reader {n}"`
    /// - email: `"reader{n}@example.com"`
    /// - password: [`DEFAULT_PASSWORD`]
    pub fn new(context: &'a TestContext) -> Self {
        let n = next_id();
        Self {
            context,
            name: format!("Reader {n}"),
            email: format!("reader{n}@example.com"),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the plaintext password; it is stored bcrypt-hashed.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Hashes the password and inserts the user into the context's user collection.
    pub fn build(self) -> Result<user::Model, TestError> {
        let now = increasing_timestamp();
        let model = user::Model {
            id: unique_object_id(),
            name: self.name,
            email: self.email,
            password: bcrypt::hash(&self.password, TEST_BCRYPT_COST)?,
            created_at: now,
            updated_at: now,
        };

        self.context.insert(collection::USERS, &model)?;
        Ok(model)
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(context).build()`.
pub fn create_user(context: &TestContext) -> Result<user::Model, TestError> {
    UserFactory::new(context).build()
}
