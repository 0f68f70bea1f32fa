use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Claims embedded in every issued token. Users carry neither a role nor
/// the admin flag; employees carry `role`; administrators carry `is_admin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn for_user(id: i32, email: impl Into<String>) -> Self {
        Self::new(id, email.into(), None, None)
    }

    pub fn for_employee(id: i32, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self::new(id, email.into(), Some(role.into()), None)
    }

    pub fn for_admin(id: i32, email: impl Into<String>, is_admin: bool) -> Self {
        Self::new(id, email.into(), None, Some(is_admin))
    }

    fn new(sub: i32, email: String, role: Option<String>, is_admin: Option<bool>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;

        Self {
            sub,
            email,
            role,
            is_admin,
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
}

/// Sign claims with the server-held HMAC secret (HS256).
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Verify signature, algorithm and expiry, returning the claims.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenError::InvalidToken)
}

/// One-way salted hash, fixed cost factor.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Constant-time-safe comparison via the bcrypt primitive. Any error is
/// treated as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = Claims::for_employee(7, "ana@example.com", "admin");
        let token = encode_claims(&claims, SECRET).unwrap();
        let decoded = decode_claims(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.email, "ana@example.com");
        assert_eq!(decoded.role.as_deref(), Some("admin"));
        assert_eq!(decoded.is_admin, None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::for_user(1, "a@b.com");
        let token = encode_claims(&claims, SECRET).unwrap();

        assert!(matches!(
            decode_claims(&token, "another-secret"),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::for_user(1, "a@b.com");
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        claims.iat = (Utc::now() - Duration::hours(9)).timestamp();

        let token = encode_claims(&claims, SECRET).unwrap();
        assert!(decode_claims(&token, SECRET).is_err());
    }

    #[test]
    fn empty_secret_never_signs_or_verifies() {
        let claims = Claims::for_user(1, "a@b.com");
        assert!(matches!(
            encode_claims(&claims, ""),
            Err(TokenError::MissingSecret)
        ));
        assert!(matches!(
            decode_claims("whatever", ""),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("s3cret!").unwrap();
        assert!(verify_password("s3cret!", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret!", "not-a-bcrypt-hash"));
    }

    #[test]
    fn user_claims_omit_role_fields_in_json() {
        let claims = Claims::for_user(3, "u@example.com");
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("role").is_none());
        assert!(json.get("is_admin").is_none());
    }
}
