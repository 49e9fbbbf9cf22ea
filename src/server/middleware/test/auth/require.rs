use super::*;

/// Tests a request carrying a valid token for an existing user.
///
/// Expected: Ok(User) for the token's user
#[tokio::test]
async fn resolves_token_user() -> Result<(), AppError> {
    let user = fixture::user::entity();
    let test = TestBuilder::new().with_user(user.clone()).build().unwrap();
    let state = AppState::for_test(test.data_dir()).await;
    let headers = bearer(&state.tokens.issue(&user.id)?);

    let resolved = AuthGuard::new(&state, &headers).require().await?;

    assert_eq!(resolved.id, user.id);

    Ok(())
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn missing_header_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let state = AppState::for_test(test.data_dir()).await;
    let headers = HeaderMap::new();

    let result = AuthGuard::new(&state, &headers).require().await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::MissingToken))));

    Ok(())
}

/// Tests a request with a non-bearer scheme.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn basic_auth_is_not_a_token() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let state = AppState::for_test(test.data_dir()).await;
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let result = AuthGuard::new(&state, &headers).require().await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::MissingToken))));

    Ok(())
}

/// Tests a request with a garbage token.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn invalid_token_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let state = AppState::for_test(test.data_dir()).await;
    let headers = bearer("definitely.not.valid");

    let result = AuthGuard::new(&state, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a valid token whose user has since been deleted.
///
/// Expected: Err(AuthError::UserNotFound)
#[tokio::test]
async fn deleted_user_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let state = AppState::for_test(test.data_dir()).await;
    let headers = bearer(&state.tokens.issue("gone")?);

    let result = AuthGuard::new(&state, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotFound(id))) if id == "gone"
    ));

    Ok(())
}
