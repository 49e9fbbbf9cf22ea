use chrono::Utc;
use entity::{collection, genre::Genre};
use test_utils::{builder::TestBuilder, factory, fixture};

use crate::server::{
    data::{error::StoreError, local::LocalStore, Store},
    model::{
        book::{BookFields, BookQuery, BookSort},
        review::ReviewFields,
    },
};

mod open;
