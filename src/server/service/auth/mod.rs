//! Registration, login and profile lookup.

pub mod token;

use crate::server::{
    data::Store,
    error::{auth::AuthError, AppError},
    model::user::{AuthenticatedUser, LoginUserParams, RegisterUserParams, User},
    service::auth::token::TokenService,
    util::{id::new_id, time},
};

pub struct AuthService<'a> {
    store: &'a dyn Store,
    tokens: &'a TokenService,
    bcrypt_cost: u32,
}

impl<'a> AuthService<'a> {
    pub fn new(store: &'a dyn Store, tokens: &'a TokenService, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    /// Creates an account and signs the new user in.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - The new user with a fresh token
    /// - `Err(AppError::AuthErr(UserExists))` - Email already registered
    pub async fn register(&self, params: RegisterUserParams) -> Result<AuthenticatedUser, AppError> {
        if self.store.find_credentials(&params.email).await?.is_some() {
            return Err(AuthError::UserExists.into());
        }

        let password = hash_password(params.password, self.bcrypt_cost).await?;
        let now = time::now();
        let user = self
            .store
            .insert_user(entity::user::Model {
                id: new_id(),
                name: params.name,
                email: params.email,
                password,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);

        let token = self.tokens.issue(&user.id)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Checks credentials and issues a token.
    ///
    /// Unknown emails and wrong passwords fail the same way.
    pub async fn login(&self, params: LoginUserParams) -> Result<AuthenticatedUser, AppError> {
        let Some(credentials) = self.store.find_credentials(&params.email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(params.password, credentials.password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(&credentials.user.id)?;
        Ok(AuthenticatedUser {
            user: credentials.user,
            token,
        })
    }

    pub async fn profile(&self, user_id: &str) -> Result<User, AppError> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()).into())
    }
}

/// bcrypt is CPU-bound, so hashing runs on the blocking pool.
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    Ok(tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}

#[cfg(test)]
mod test;
