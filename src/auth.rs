use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}

/// Issues and verifies the bearer tokens that identify a session.
#[derive(Debug, Clone)]
pub struct TokenManager {
    secret: String,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>) -> Self {
        TokenManager {
            secret: secret.into(),
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Returns the user id carried by a valid, unexpired token. Any decode
    /// or expiry failure reads as a missing session.
    pub fn verify(&self, token: &str) -> Result<Uuid, DomainError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| DomainError::AuthRequired)?;
        Ok(data.claims.sub)
    }
}

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal(e.to_string()))
}

pub fn verify_password(hash: &str, password: &str) -> Result<bool, DomainError> {
    bcrypt::verify(password, hash).map_err(|e| DomainError::Internal(e.to_string()))
}
