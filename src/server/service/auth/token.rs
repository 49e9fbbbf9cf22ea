use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::error::{auth::AuthError, AppError};

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Id of the authenticated user.
    id: String,
    iat: u64,
    exp: u64,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    /// Signs a token for `user_id` that expires after the configured lifetime.
    pub fn issue(&self, user_id: &str) -> Result<String, AppError> {
        let iat = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            id: user_id.to_string(),
            iat,
            exp: iat.saturating_add(self.lifetime.as_secs()),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Checks signature and expiry.
    ///
    /// # Returns
    /// - `Ok(String)` - Id of the user the token was issued to
    /// - `Err(AuthError::InvalidToken)` - Malformed, tampered with or expired
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat"]);

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(AuthError::InvalidToken)?;
        Ok(data.claims.id)
    }
}
