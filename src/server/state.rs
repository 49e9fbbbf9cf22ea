//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's state
//! extraction. Every field is cheap to clone.

use std::sync::Arc;

use crate::server::{data::fallback::FallbackStore, service::auth::token::TokenService};

#[derive(Clone)]
pub struct AppState {
    /// Storage, with the document store preferred and local JSON files as fallback.
    pub store: Arc<FallbackStore>,

    /// Signs and verifies access tokens.
    pub tokens: TokenService,

    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<FallbackStore>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over local storage in `data_dir`, with a fixed token secret and the cheapest
    /// bcrypt cost.
    pub async fn for_test(data_dir: &std::path::Path) -> Self {
        use std::time::Duration;

        use crate::server::data::local::LocalStore;

        let local = LocalStore::open(data_dir).await.unwrap();
        Self::new(
            Arc::new(FallbackStore::local_only(local)),
            TokenService::new("test-secret", Duration::from_secs(3600)),
            4,
        )
    }
}
