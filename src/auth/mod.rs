use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;
pub mod policy;

/// Claims embedded in an issued token. The email is the only identity fact
/// this system asserts; `iat`/`exp` bound the token in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("JWT secret is not configured")]
    InvalidSecret,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid token")]
    InvalidToken,
}

/// Sign the claims into a compact HS256 token.
///
/// The claims payload is embedded as-is; callers decide what identity goes
/// in. Credential checks happen at the login handler, not here.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiration, returning the embedded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::InvalidToken,
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let claims = Claims::new("alice@example.com".to_string(), 24);

        let token = issue_token(&claims, TEST_SECRET).unwrap();
        assert!(!token.is_empty());

        let decoded = verify_token(&token, TEST_SECRET).unwrap();
        assert_eq!(decoded.email, "alice@example.com");
        assert_eq!(decoded.exp, claims.exp);
        assert_eq!(decoded.iat, claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Backdate well past the default validation leeway
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: "alice@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = issue_token(&claims, TEST_SECRET).unwrap();
        let err = verify_token(&token, TEST_SECRET).unwrap_err();
        assert!(matches!(err, JwtError::TokenExpired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new("alice@example.com".to_string(), 24);
        let token = issue_token(&claims, TEST_SECRET).unwrap();

        let err = verify_token(&token, "another-secret-key-for-testing-minimum-32ch").unwrap_err();
        assert!(matches!(err, JwtError::InvalidToken));
    }

    #[test]
    fn empty_secret_refuses_to_sign_or_verify() {
        let claims = Claims::new("alice@example.com".to_string(), 24);
        assert!(matches!(
            issue_token(&claims, "").unwrap_err(),
            JwtError::InvalidSecret
        ));
        assert!(matches!(
            verify_token("whatever", "").unwrap_err(),
            JwtError::InvalidSecret
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let err = verify_token("not.a.token", TEST_SECRET).unwrap_err();
        assert!(matches!(err, JwtError::InvalidToken));
    }
}
