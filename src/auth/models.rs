//! Authentication Models
//!
//! Data structures for accounts, token claims, authentication requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Registered account as held by a credential store.
///
/// Only the argon2 PHC string of the secret is kept; the plaintext never
/// outlives the request that carried it.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Verified identity extracted from an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
}

/// JWT Claims structure containing the subject and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username the token was issued for
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
    /// Unique token id
    pub jti: Uuid,
}

/// Register and login payload.
///
/// Fields are optional so that a missing field surfaces as our own
/// `InvalidInput` rather than an extractor rejection.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[serde(alias = "secret")]
    #[schema(example = "hunter2")]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Returns both fields when present and non-empty
    pub fn into_parts(self) -> Option<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}

/// Token response after successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}
