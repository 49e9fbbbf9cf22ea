//! User fixtures.

use entity::user;

use crate::fixture::{fixed_id, timestamp};

pub const DEFAULT_NAME: &str = "Test Reader";
pub const DEFAULT_EMAIL: &str = "reader@example.com";

/// Placeholder that is not a valid bcrypt hash; use the user factory when a test logs in.
pub const PLACEHOLDER_PASSWORD_HASH: &str = "not-a-bcrypt-hash";

/// Creates a user document with default values.
///
/// # Default Values
/// - id: `fixed_id(1)`
/// - name: `"Test Reader"`
/// - email: `"reader@example.com"`
pub fn entity() -> user::Model {
    user::Model {
        id: fixed_id(1),
        name: DEFAULT_NAME.to_string(),
        email: DEFAULT_EMAIL.to_string(),
        password: PLACEHOLDER_PASSWORD_HASH.to_string(),
        created_at: timestamp(0),
        updated_at: timestamp(0),
    }
}

/// Creates a second user distinct from [`entity`].
pub fn other_entity() -> user::Model {
    user::Model {
        id: fixed_id(2),
        name: "Other Reader".to_string(),
        email: "other@example.com".to_string(),
        ..entity()
    }
}
