//! HS256 session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn issue(secret: &str, user_id: &str, ttl_hours: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(ttl_hours)).timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Checks signature and expiry and returns the claims.
pub fn verify(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let t = issue("0123456789abcdef", "user-1", 1).unwrap();
        let c = verify("0123456789abcdef", &t).unwrap();
        assert_eq!(c.sub, "user-1");
        assert!(c.exp > c.iat);
    }

    #[test]
    fn wrong_secret_rejected() {
        let t = issue("0123456789abcdef", "user-1", 1).unwrap();
        assert!(matches!(verify("fedcba9876543210", &t), Err(AuthError::TokenError(_))));
    }

    #[test]
    fn expired_token_rejected() {
        // Past the default 60s leeway.
        let t = issue("0123456789abcdef", "user-1", -1).unwrap();
        assert!(verify("0123456789abcdef", &t).is_err());
    }
}
