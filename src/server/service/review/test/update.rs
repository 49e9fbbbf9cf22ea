use super::*;

/// Tests the author changing their rating.
///
/// Expected: review updated and the book's rating recomputed
#[tokio::test]
async fn author_updates_review_and_rating() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let reader = factory::user::create_user(&test).unwrap();
    let other = factory::user::create_user(&test).unwrap();
    let book = factory::book::create_book(&test, &reader.id).unwrap();
    let store = store(&test).await;
    let service = ReviewService::new(&store);

    let review = service.create(&user(reader.clone()), &book.id, fields(5)).await?;
    service.create(&user(other), &book.id, fields(3)).await?;

    let updated = service
        .update(&user(reader), &review.review.id, fields(1))
        .await?;

    assert_eq!(updated.review.rating, 1);
    let rating = store.find_book(&book.id).await?.unwrap().rating;
    assert_eq!(rating.average, 2.0);
    assert_eq!(rating.total, 2);

    Ok(())
}

/// Tests another user editing a review.
///
/// Expected: Err(AuthError::NotOwner)
#[tokio::test]
async fn non_author_cannot_update() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let author = factory::user::create_user(&test).unwrap();
    let intruder = factory::user::create_user(&test).unwrap();
    let book = factory::book::create_book(&test, &author.id).unwrap();
    let review = factory::review::create_review(&test, &book.id, &author.id).unwrap();
    let store = store(&test).await;

    let result = ReviewService::new(&store)
        .update(&user(intruder), &review.id, fields(1))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotOwner { action: "update this review", .. }))
    ));

    Ok(())
}

/// Tests editing a review that does not exist.
///
/// Expected: Err(AppError::NotFound) with "Review not found"
#[tokio::test]
async fn missing_review_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let store = store(&test).await;

    let result = ReviewService::new(&store)
        .update(&user(fixture::user::entity()), "missing", fields(1))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Review not found"));

    Ok(())
}
