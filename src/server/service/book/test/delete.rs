use super::*;

/// Tests the owner deleting a reviewed book.
///
/// Expected: the book and its reviews are removed, other books' reviews stay
#[tokio::test]
async fn deletes_book_with_its_reviews() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let owner = factory::user::create_user(&test).unwrap();
    let book = factory::book::create_book(&test, &owner.id).unwrap();
    let other_book = factory::book::create_book(&test, &owner.id).unwrap();
    factory::review::create_review(&test, &book.id, "reader-a").unwrap();
    factory::review::create_review(&test, &book.id, "reader-b").unwrap();
    let kept = factory::review::create_review(&test, &other_book.id, "reader-a").unwrap();
    let store = store(&test).await;

    BookService::new(&store)
        .delete(&user(owner), &book.id)
        .await?;

    assert!(store.find_book(&book.id).await?.is_none());
    assert!(store.reviews_for_book(&book.id).await?.is_empty());
    let remaining = store.reviews_for_book(&other_book.id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);

    Ok(())
}

/// Tests another user deleting a book they do not own.
///
/// Expected: Err(AuthError::NotOwner) and the book remains
#[tokio::test]
async fn non_owner_cannot_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let owner = factory::user::create_user(&test).unwrap();
    let intruder = factory::user::create_user(&test).unwrap();
    let book = factory::book::create_book(&test, &owner.id).unwrap();
    let store = store(&test).await;

    let result = BookService::new(&store)
        .delete(&user(intruder), &book.id)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotOwner { action: "delete this book", .. }))
    ));
    assert!(store.find_book(&book.id).await?.is_some());

    Ok(())
}
