use entity::genre::Genre;
use test_utils::{builder::TestBuilder, context::TestContext, factory, fixture};

use crate::server::{
    data::{local::LocalStore, Store},
    error::{auth::AuthError, AppError},
    model::{
        book::{BookFields, BookQuery},
        user::User,
    },
    service::book::BookService,
};

mod delete;

async fn store(test: &TestContext) -> LocalStore {
    LocalStore::open(test.data_dir()).await.unwrap()
}

fn user(entity: entity::user::Model) -> User {
    User::from_entity(entity)
}

fn fields() -> BookFields {
    BookFields {
        title: "Hyperion".to_string(),
        author: "Dan Simmons".to_string(),
        description: "Pilgrims on a distant world.".to_string(),
        genre: Genre::ScienceFiction,
        published_year: 1989,
    }
}
