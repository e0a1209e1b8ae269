//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the minimal identity projection (user id
//! and username) plus issued-at/expiry timestamps. The signing secret and
//! lifetime are injected at construction; there is no process-wide key
//! state. Expiry is checked with zero leeway so a token is good up to the
//! exact end of its lifetime and no further.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 3;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims embedded in every issued token.
///
/// Only the identity projection goes into the token; password hashes and
/// profile fields must never reach the request context this way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id (24-char hex document id).
    pub sub: String,
    /// Username at issuance time.
    pub username: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token supplied (no `Authorization` header, or a header with no
    /// token field).
    #[error("no token supplied")]
    Missing,
    /// The token could not be parsed or its signature did not verify.
    #[error("invalid token")]
    Malformed,
    /// The token was valid once but its expiry has passed.
    #[error("token has expired")]
    Expired,
}

/// Signing failed. Only unexpected crypto-layer failures end up here.
#[derive(Debug, Error)]
#[error("token signing failed: {0}")]
pub struct TokenIssueError(#[from] jsonwebtoken::errors::Error);

/// Issues and verifies signed identity tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Build a service from the server-held secret and a lifetime in days.
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self::with_ttl(secret, Duration::days(ttl_days))
    }

    /// Build a service with an explicit lifetime.
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token for the given identity, expiring `ttl` from now.
    pub fn issue(&self, user_id: &str, username: &str) -> Result<String, TokenIssueError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a raw token string, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    /// Verify the token carried by an `Authorization` header value.
    ///
    /// The header format is `<scheme> <token>`. The scheme is ignored;
    /// only the second whitespace-separated field is used. An absent
    /// header, or one with no token field, is `TokenError::Missing`.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, TokenError> {
        let header = header.ok_or(TokenError::Missing)?;
        let token = header
            .split_whitespace()
            .nth(1)
            .ok_or(TokenError::Missing)?;
        self.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const USER_ID: &str = "65a1b2c3d4e5f60718293a4b";

    #[test]
    fn issue_and_verify_roundtrip() {
        let service = TokenService::new(SECRET, DEFAULT_TOKEN_TTL_DAYS);
        let token = service.issue(USER_ID, "ada").expect("should issue");

        let claims = service.verify(&token).expect("should verify");
        assert_eq!(claims.sub, USER_ID);
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_DAYS * 24 * 3600);
    }

    #[test]
    fn tampered_token_is_malformed() {
        let service = TokenService::new(SECRET, DEFAULT_TOKEN_TTL_DAYS);
        let token = service.issue(USER_ID, "ada").expect("should issue");

        let mut tampered = token.clone();
        tampered.push('x');
        assert_eq!(service.verify(&tampered), Err(TokenError::Malformed));
        assert_eq!(
            service.verify("not.a.token"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let issuer = TokenService::new(SECRET, DEFAULT_TOKEN_TTL_DAYS);
        let verifier = TokenService::new("another-secret", DEFAULT_TOKEN_TTL_DAYS);
        let token = issuer.issue(USER_ID, "ada").expect("should issue");

        assert_eq!(verifier.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn token_is_accepted_just_before_expiry() {
        // A couple of seconds of remaining lifetime must still verify.
        let service = TokenService::with_ttl(SECRET, Duration::seconds(5));
        let token = service.issue(USER_ID, "ada").expect("should issue");

        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn token_is_rejected_just_after_expiry() {
        // An already-elapsed lifetime must fail as Expired, not Malformed.
        let service = TokenService::with_ttl(SECRET, Duration::seconds(-5));
        let token = service.issue(USER_ID, "ada").expect("should issue");

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn header_extraction_ignores_scheme() {
        let service = TokenService::new(SECRET, DEFAULT_TOKEN_TTL_DAYS);
        let token = service.issue(USER_ID, "ada").expect("should issue");

        let bearer = format!("Bearer {token}");
        assert!(service.verify_header(Some(&bearer)).is_ok());

        let other_scheme = format!("Token {token}");
        assert!(service.verify_header(Some(&other_scheme)).is_ok());
    }

    #[test]
    fn header_without_token_is_missing() {
        let service = TokenService::new(SECRET, DEFAULT_TOKEN_TTL_DAYS);

        assert_eq!(service.verify_header(None), Err(TokenError::Missing));
        assert_eq!(
            service.verify_header(Some("Bearer")),
            Err(TokenError::Missing)
        );
    }
}
