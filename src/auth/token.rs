use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::database::models::user::UserId;

/// Claims embedded in every bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token generation error: {0}")]
    Generation(String),
}

/// Signed token plus the instant it stops being accepted
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 bearer tokens. Verification is purely
/// cryptographic; no storage is consulted.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            &config.secret_key,
            Duration::hours(config.token_expiry_hours as i64),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: UserId, email: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: UserId,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            id: user_id,
            email: email.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: no grace period past `exp`.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-12345", Duration::hours(2))
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let service = service();
        let issued = service.issue(7, "a@x.com").unwrap();

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn token_accepted_until_expiry() {
        let service = service();
        let issued_at = Utc::now() - Duration::hours(2) + Duration::seconds(60);
        let issued = service.issue_at(1, "a@x.com", issued_at).unwrap();
        assert!(service.verify(&issued.token).is_ok());
    }

    #[test]
    fn token_rejected_after_expiry() {
        let service = service();
        let issued_at = Utc::now() - Duration::hours(2) - Duration::seconds(5);
        let issued = service.issue_at(1, "a@x.com", issued_at).unwrap();
        assert!(matches!(service.verify(&issued.token), Err(TokenError::Expired)));
    }

    #[test]
    fn different_secrets_reject() {
        let issued = service().issue(1, "a@x.com").unwrap();
        let other = TokenService::new("another-secret", Duration::hours(2));
        assert!(matches!(other.verify(&issued.token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn malformed_and_tampered_tokens_reject() {
        let service = service();
        assert!(matches!(service.verify("invalid.token.here"), Err(TokenError::Invalid(_))));
        assert!(matches!(service.verify(""), Err(TokenError::Invalid(_))));

        let issued = service.issue(1, "a@x.com").unwrap();
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let forged = service.issue(2, "b@x.com").unwrap();
        let forged_payload = forged.token.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        let tampered = parts.join(".");
        assert!(matches!(service.verify(&tampered), Err(TokenError::Invalid(_))));
    }
}
