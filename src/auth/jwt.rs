//! JWT Token Service
//!
//! Issues and verifies the signed, time-bound access tokens handed out at login.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::models::{Claims, Identity};

const ISSUER: &str = "access-gate";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// JWT Service for token operations.
///
/// Keys are fixed at construction, so every method takes `&self` and the
/// service can be shared across requests without locking.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service with the provided secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            ttl,
        }
    }

    /// Issue a token asserting `username` as subject
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| TokenError::Signing("token lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp,
            iss: ISSUER.to_string(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return the identity it asserts
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        Ok(Identity {
            username: data.claims.sub,
        })
    }
}
