use axum::http::HeaderMap;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::User,
    service::auth::AuthService,
    state::AppState,
};

/// Resolves the user behind the `Authorization: Bearer` header of a private request.
pub struct AuthGuard<'a> {
    state: &'a AppState,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(state: &'a AppState, headers: &'a HeaderMap) -> Self {
        Self { state, headers }
    }

    /// # Returns
    /// - `Ok(User)` - The token is valid and its user exists
    /// - `Err(AuthError::MissingToken)` - No bearer token
    /// - `Err(AuthError::InvalidToken)` - Bad signature or expired
    /// - `Err(AuthError::UserNotFound)` - The user was deleted after the token was issued
    pub async fn require(&self) -> Result<User, AppError> {
        let Some(Authorization(bearer)) = self.headers.typed_get::<Authorization<Bearer>>() else {
            return Err(AuthError::MissingToken.into());
        };

        let user_id = self.state.tokens.verify(bearer.token().trim())?;

        AuthService::new(
            self.state.store.as_ref(),
            &self.state.tokens,
            self.state.bcrypt_cost,
        )
        .profile(&user_id)
        .await
    }
}
