use super::*;

/// Tests opening a store in a directory with no collection files.
///
/// Expected: every collection file is created holding an empty array
#[tokio::test]
async fn creates_missing_collection_files() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().unwrap();

    let store = LocalStore::open(test.data_dir()).await?;

    for name in [collection::USERS, collection::BOOKS, collection::REVIEWS] {
        let contents = std::fs::read_to_string(test.collection_path(name))?;
        assert_eq!(contents, "[]");
    }
    assert!(store.list_books(&BookQuery::default()).await?.0.is_empty());

    Ok(())
}

/// Tests opening a store over seeded collection files.
///
/// Expected: existing documents are kept and readable
#[tokio::test]
async fn keeps_existing_documents() -> Result<(), StoreError> {
    let owner = fixture::user::entity();
    let test = TestBuilder::new()
        .with_user(owner.clone())
        .with_book(fixture::book::entity(&owner.id))
        .build()
        .unwrap();

    let store = LocalStore::open(test.data_dir()).await?;

    let book = store.find_book(&fixture::book::entity(&owner.id).id).await?;
    assert_eq!(book.map(|b| b.title), Some("Dune".to_string()));
    assert!(store.find_user(&owner.id).await?.is_some());

    Ok(())
}

/// Tests opening a store in a directory that does not exist yet.
///
/// Expected: the directory is created
#[tokio::test]
async fn creates_nested_data_directory() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().unwrap();
    let dir = test.data_dir().join("nested").join("data");

    let store = LocalStore::open(&dir).await?;

    assert_eq!(store.dir(), dir.as_path());
    assert!(dir.join("books.json").exists());

    Ok(())
}

/// Tests reading a collection whose file holds invalid JSON.
///
/// Expected: Err(StoreError::Json) rather than an empty result
#[tokio::test]
async fn corrupt_file_is_an_error() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().unwrap();
    let store = LocalStore::open(test.data_dir()).await?;
    test.write_raw(collection::BOOKS, "{ not json").unwrap();

    let result = store.list_books(&BookQuery::default()).await;

    assert!(matches!(result, Err(StoreError::Json(_))));

    Ok(())
}

/// Tests that writes leave no temporary file behind.
///
/// Expected: only the three collection files remain in the directory
#[tokio::test]
async fn writes_replace_files_in_place() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().unwrap();
    let store = LocalStore::open(test.data_dir()).await?;

    store.insert_user(fixture::user::entity()).await?;

    let mut names: Vec<_> = std::fs::read_dir(test.data_dir())?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["books.json", "reviews.json", "users.json"]);

    Ok(())
}
