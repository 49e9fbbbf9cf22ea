use super::*;

fn params(email: &str, password: &str) -> LoginUserParams {
    LoginUserParams {
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Tests logging in with the factory password.
///
/// Expected: the stored user and a token for them
#[tokio::test]
async fn logs_in_with_correct_password() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let user = factory::user::create_user(&test).unwrap();
    let store = store(&test).await;
    let tokens = tokens();
    let service = AuthService::new(&store, &tokens, TEST_COST);

    let session = service
        .login(params(&user.email, factory::user::DEFAULT_PASSWORD))
        .await?;

    assert_eq!(session.user.id, user.id);
    assert_eq!(tokens.verify(&session.token)?, user.id);

    Ok(())
}

/// Tests logging in with a wrong password and with an unknown email.
///
/// Expected: Err(AuthError::InvalidCredentials) for both
#[tokio::test]
async fn rejects_bad_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().build().unwrap();
    let user = factory::user::create_user(&test).unwrap();
    let store = store(&test).await;
    let tokens = tokens();
    let service = AuthService::new(&store, &tokens, TEST_COST);

    let wrong_password = service.login(params(&user.email, "not-it")).await;
    let unknown_email = service
        .login(params("nobody@example.com", factory::user::DEFAULT_PASSWORD))
        .await;

    for result in [wrong_password, unknown_email] {
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
    }

    Ok(())
}
