//! Bearer token signing and verification.
//!
//! Tokens are HS256 JWTs carrying the identity subject and an expiry.
//! Verification is a pure function of the token, the shared secret and the
//! clock, so any number of server instances can verify without a session
//! store.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch or malformed token.
    #[error("invalid token")]
    Invalid,

    /// Token is past its expiry.
    #[error("token expired")]
    Expired,

    /// Token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (normalized email of the identity).
    pub sub: String,
    /// Issued at timestamp (seconds).
    pub iat: i64,
    /// Expiration timestamp (seconds).
    pub exp: i64,
    /// JWT ID (unique identifier).
    pub jti: String,
}

/// Signs and verifies bearer tokens with a pre-shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a new codec from a secret key.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against an explicit clock so the
        // boundary is exact (no leeway).
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `subject` valid for `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat.saturating_add(ttl.as_secs().min(i64::MAX as u64) as i64),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            TokenError::Signing(e.to_string())
        })
    }

    /// Verify a token and return its subject.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// A token is expired once `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            TokenError::Invalid
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    const SECRET: &str = "test-secret-key-for-testing-only";

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(SECRET);
        let token = codec
            .issue("alice@example.com", Duration::from_secs(3600))
            .unwrap();
        assert_eq!(codec.verify(&token).unwrap(), "alice@example.com");
    }

    #[test]
    fn test_token_is_url_safe() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue("a@b.c", Duration::from_secs(60)).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_valid_until_ttl_elapses() {
        let codec = TokenCodec::new(SECRET);
        let issued = 1_700_000_000;
        let token = codec
            .issue_at("bob@example.com", Duration::from_secs(60), at(issued))
            .unwrap();

        assert_eq!(codec.verify_at(&token, at(issued)).unwrap(), "bob@example.com");
        assert!(codec.verify_at(&token, at(issued + 59)).is_ok());
        assert_eq!(
            codec.verify_at(&token, at(issued + 60)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.verify_at(&token, at(issued + 3600)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue("carol@example.com", Duration::ZERO).unwrap();
        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue("dave@example.com", Duration::from_secs(3600)).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = signature.chars().collect();
        sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", head, sig.into_iter().collect::<String>());

        assert_eq!(codec.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_payload_fails() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue("eve@example.com", Duration::from_secs(3600)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        // Rewrite the subject but keep the original signature
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let mut claims: Claims = serde_json::from_slice(&payload).unwrap();
        claims.sub = "admin@example.com".to_string();
        let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(codec.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = TokenCodec::new("secret1")
            .issue("frank@example.com", Duration::from_secs(3600))
            .unwrap();
        let other = TokenCodec::new("secret2");
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_malformed_token_fails() {
        let codec = TokenCodec::new(SECRET);
        assert_eq!(codec.verify(""), Err(TokenError::Invalid));
        assert_eq!(codec.verify("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(codec.verify("a.b.c"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tokens_are_unique() {
        let codec = TokenCodec::new(SECRET);
        let a = codec.issue("same@example.com", Duration::from_secs(60)).unwrap();
        let b = codec.issue("same@example.com", Duration::from_secs(60)).unwrap();
        assert_ne!(a, b);
    }
}
