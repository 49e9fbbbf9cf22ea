use super::*;

fn review_body(rating: i64, text: &str) -> Value {
    json!({ "rating": rating, "reviewText": text })
}

/// Tests reviewing a book and the effect on its rating.
///
/// Expected: 201, and the book's average and count reflect both reviews
#[tokio::test]
async fn creates_review_and_refreshes_rating() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let owner = factory::user::create_user(&test)?;
    let first = factory::user::UserFactory::new(&test).name("Ada").build()?;
    let second = factory::user::create_user(&test)?;
    let book = factory::book::create_book(&test, &owner.id)?;
    let (app, state) = app(&test).await;
    let uri = format!("/api/reviews/{}", book.id);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&token_for(&state, &first.id)),
        Some(review_body(5, "Loved it")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Review added successfully");
    assert_eq!(body["data"]["user"], json!({ "_id": first.id, "name": "Ada" }));
    assert_eq!(body["data"]["book"], book.id.as_str());

    let (status, _) = send(
        &app,
        Method::POST,
        &uri,
        Some(&token_for(&state, &second.id)),
        Some(review_body(4, "Good")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, &format!("/api/books/{}", book.id), None, None).await;
    assert_eq!(body["data"]["averageRating"], 4.5);
    assert_eq!(body["data"]["totalReviews"], 2);

    Ok(())
}

/// Tests reviewing the same book twice.
///
/// Expected: 400 "You have already reviewed this book"
#[tokio::test]
async fn rejects_second_review() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let owner = factory::user::create_user(&test)?;
    let reader = factory::user::create_user(&test)?;
    let book = factory::book::create_book(&test, &owner.id)?;
    factory::review::create_review(&test, &book.id, &reader.id)?;
    let (app, state) = app(&test).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/reviews/{}", book.id),
        Some(&token_for(&state, &reader.id)),
        Some(review_body(2, "Changed my mind")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You have already reviewed this book");

    Ok(())
}

/// Tests reviewing a book that does not exist, and an out-of-range rating.
///
/// Expected: 404 "Book not found", then 400 "Validation errors"
#[tokio::test]
async fn rejects_bad_review_requests() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let owner = factory::user::create_user(&test)?;
    let book = factory::book::create_book(&test, &owner.id)?;
    let (app, state) = app(&test).await;
    let token = token_for(&state, &owner.id);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reviews/missing",
        Some(&token),
        Some(review_body(3, "Where is it?")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/reviews/{}", book.id),
        Some(&token),
        Some(review_body(6, "Off the scale")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation errors");
    assert_eq!(body["errors"][0]["field"], "rating");

    Ok(())
}

/// Tests that only the author may edit or delete a review.
///
/// Expected: 401 with the action in the message
#[tokio::test]
async fn rejects_non_author() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let owner = factory::user::create_user(&test)?;
    let author = factory::user::create_user(&test)?;
    let book = factory::book::create_book(&test, &owner.id)?;
    let review = factory::review::create_review(&test, &book.id, &author.id)?;
    let (app, state) = app(&test).await;
    let token = token_for(&state, &owner.id);
    let uri = format!("/api/reviews/{}", review.id);

    let (status, body) = send(&app, Method::PUT, &uri, Some(&token), Some(review_body(1, "Bad"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized to update this review");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized to delete this review");

    Ok(())
}

/// Tests editing and then deleting one's own review.
///
/// Expected: the rating follows each change and resets to 0 after the delete
#[tokio::test]
async fn updates_and_deletes_own_review() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let owner = factory::user::create_user(&test)?;
    let author = factory::user::create_user(&test)?;
    let book = factory::book::BookFactory::new(&test, &owner.id)
        .rating(3.0, 1)
        .build()?;
    let review = factory::review::create_review(&test, &book.id, &author.id)?;
    let (app, state) = app(&test).await;
    let token = token_for(&state, &author.id);
    let uri = format!("/api/reviews/{}", review.id);
    let book_uri = format!("/api/books/{}", book.id);

    let (status, body) = send(&app, Method::PUT, &uri, Some(&token), Some(review_body(1, "Worse on reread"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 1);
    assert_eq!(body["data"]["reviewText"], "Worse on reread");

    let (_, body) = send(&app, Method::GET, &book_uri, None, None).await;
    assert_eq!(body["data"]["averageRating"], 1.0);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review deleted successfully");

    let (_, body) = send(&app, Method::GET, &book_uri, None, None).await;
    assert_eq!(body["data"]["averageRating"], 0.0);
    assert_eq!(body["data"]["totalReviews"], 0);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Review not found");

    Ok(())
}

/// Tests the public review list of a book and the caller's own review list.
///
/// Expected: newest first, with reviewer names and book titles resolved
#[tokio::test]
async fn lists_reviews() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let owner = factory::user::create_user(&test)?;
    let ada = factory::user::UserFactory::new(&test).name("Ada").build()?;
    let grace = factory::user::UserFactory::new(&test).name("Grace").build()?;
    let dune = factory::book::BookFactory::new(&test, &owner.id)
        .title("Dune")
        .author("Frank Herbert")
        .build()?;
    let emma = factory::book::create_book(&test, &owner.id)?;
    factory::review::create_review(&test, &dune.id, &ada.id)?;
    factory::review::create_review(&test, &dune.id, &grace.id)?;
    factory::review::create_review(&test, &emma.id, &ada.id)?;
    let (app, state) = app(&test).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/reviews/{}", dune.id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["user"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Grace", "Ada"]);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reviews/user/myreviews",
        Some(&token_for(&state, &ada.id)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["book"]["_id"], emma.id.as_str());
    assert_eq!(
        reviews[1]["book"],
        json!({ "_id": dune.id, "title": "Dune", "author": "Frank Herbert" })
    );
    assert_eq!(reviews[1]["user"], ada.id.as_str());

    Ok(())
}
