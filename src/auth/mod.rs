use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Claims carried by an issued token: a subject identity and a fixed expiry.
/// No refresh, no revocation list.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token generation failed: {0}")]
    Generation(String),

    #[error("invalid or expired token: {0}")]
    Verification(String),

    #[error("token secret is not configured")]
    MissingSecret,
}

/// Issue a signed token asserting the given subject, expiring per config.
pub fn issue(subject: &str) -> Result<String, TokenError> {
    sign(&Claims::new(subject))
}

/// Sign a prepared set of claims with the shared secret.
pub fn sign(claims: &Claims) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify(token: &str) -> Result<Claims, TokenError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::Verification(e.to_string()))
}
