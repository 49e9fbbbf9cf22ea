use super::*;

fn params(email: &str) -> RegisterUserParams {
    RegisterUserParams {
        name: "Ada".to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
    }
}

/// Tests registering a new account.
///
/// Expected: stored user with a bcrypt hash and a token for that user
#[tokio::test]
async fn registers_user_and_issues_token() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let store = store(&test).await;
    let tokens = tokens();
    let service = AuthService::new(&store, &tokens, TEST_COST);

    let registered = service.register(params("ada@example.com")).await?;

    assert_eq!(registered.user.name, "Ada");
    assert_eq!(tokens.verify(&registered.token)?, registered.user.id);

    let users: Vec<entity::user::Model> = test.read(entity::collection::USERS).unwrap();
    assert_eq!(users.len(), 1);
    assert_ne!(users[0].password, "secret1");
    assert!(bcrypt::verify("secret1", &users[0].password).unwrap());

    Ok(())
}

/// Tests registering with an email that already has an account.
///
/// Expected: Err(AuthError::UserExists)
#[tokio::test]
async fn rejects_taken_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(fixture::user::entity())
        .build()
        .unwrap();
    let store = store(&test).await;
    let tokens = tokens();
    let service = AuthService::new(&store, &tokens, TEST_COST);

    let result = service.register(params(fixture::user::DEFAULT_EMAIL)).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserExists))
    ));

    Ok(())
}
