//! Credential and token service: bcrypt password hashing plus signed,
//! time-limited bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        Self::with_expiry(user_id, email, now.timestamp(), expiry_hours)
    }

    fn with_expiry(user_id: Uuid, email: String, iat: i64, expiry_hours: u64) -> Self {
        let exp = iat + Duration::hours(expiry_hours as i64).num_seconds();
        Self {
            user_id,
            email,
            exp,
            iat,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// The token was well-formed and correctly signed but past its expiry.
    Expired,
    /// Anything else: bad signature, wrong shape, not a JWT at all.
    Invalid,
    /// The signing secret is not configured; token operations cannot work.
    SecretMissing,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Expired => write!(f, "token expired"),
            TokenError::Invalid => write!(f, "invalid token"),
            TokenError::SecretMissing => write!(f, "JWT secret not configured"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issue a signed token for the given account using the configured secret
/// and expiry.
pub fn issue_token(user_id: Uuid, email: &str) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;
    encode_claims(&Claims::new(user_id, email.to_string()), secret)
}

/// Verify a bearer token against the configured secret and return its claims.
pub fn decode_token(token: &str) -> Result<Claims, TokenError> {
    decode_claims(token, &config::config().security.jwt_secret)
}

pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::SecretMissing);
    }
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Invalid)
}

pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::SecretMissing);
    }
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}

/// Hash a password with the configured bcrypt cost factor.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash_password_with_cost(password, config::config().security.password_hash_cost)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trip_preserves_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::with_expiry(user_id, "a@example.com".to_string(), Utc::now().timestamp(), 1);
        let token = encode_claims(&claims, SECRET).expect("encode");

        let decoded = decode_claims(&token, SECRET).expect("decode");
        assert_eq!(decoded.user_id, user_id);
        assert_eq!(decoded.email, "a@example.com");
    }

    #[test]
    fn expired_token_is_distinguished_from_invalid() {
        let iat = Utc::now().timestamp() - 7200;
        let mut claims = Claims::with_expiry(Uuid::new_v4(), "a@example.com".to_string(), iat, 0);
        claims.exp = iat + 1;
        let token = encode_claims(&claims, SECRET).expect("encode");

        assert_eq!(decode_claims(&token, SECRET), Err(TokenError::Expired));
        assert_eq!(decode_claims("garbage", SECRET), Err(TokenError::Invalid));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let claims = Claims::with_expiry(Uuid::new_v4(), "a@example.com".to_string(), Utc::now().timestamp(), 1);
        let token = encode_claims(&claims, SECRET).expect("encode");
        assert_eq!(decode_claims(&token, "other-secret"), Err(TokenError::Invalid));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let claims = Claims::with_expiry(Uuid::new_v4(), "a@example.com".to_string(), Utc::now().timestamp(), 1);
        assert_eq!(encode_claims(&claims, ""), Err(TokenError::SecretMissing));
    }

    #[test]
    fn password_hash_round_trip() {
        // Low cost keeps the test fast; production cost comes from config.
        let hash = hash_password_with_cost("secret123", 4).expect("hash");
        assert!(verify_password("secret123", &hash).expect("verify"));
        assert!(!verify_password("not-the-password", &hash).expect("verify"));
    }
}
