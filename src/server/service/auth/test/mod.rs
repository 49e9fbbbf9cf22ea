use std::time::Duration;

use test_utils::{builder::TestBuilder, context::TestContext, factory, fixture};

use crate::server::{
    data::local::LocalStore,
    error::{auth::AuthError, AppError},
    model::user::{LoginUserParams, RegisterUserParams},
    service::auth::{token::TokenService, AuthService},
};

mod login;
mod register;

const TEST_COST: u32 = 4;

fn tokens() -> TokenService {
    TokenService::new("test-secret", Duration::from_secs(3600))
}

async fn store(test: &TestContext) -> LocalStore {
    LocalStore::open(test.data_dir()).await.unwrap()
}
