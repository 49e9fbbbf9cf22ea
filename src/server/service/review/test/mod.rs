use test_utils::{builder::TestBuilder, context::TestContext, factory, fixture};

use crate::server::{
    data::{local::LocalStore, Store},
    error::{auth::AuthError, AppError},
    model::{review::ReviewFields, user::User},
    service::review::ReviewService,
};

mod update;

async fn store(test: &TestContext) -> LocalStore {
    LocalStore::open(test.data_dir()).await.unwrap()
}

fn user(entity: entity::user::Model) -> User {
    User::from_entity(entity)
}

fn fields(rating: i32) -> ReviewFields {
    ReviewFields {
        rating,
        review_text: "Thoughtful and well paced.".to_string(),
    }
}
