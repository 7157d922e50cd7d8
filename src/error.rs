//! # API Error Types
//!
//! Every handler failure ends up here and is converted into a status code plus
//! a minimal message. Internal and upstream details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::auth::jwt::TokenError;
use crate::auth::store::AccountError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request fields (400).
    #[error("Username and password are required")]
    InvalidInput,

    /// Username already registered (409).
    #[error("Username already exists")]
    DuplicateAccount,

    /// Login did not match any account (401). Does not say which field was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No bearer token on a protected route (401).
    #[error("unauthorized")]
    Unauthorized,

    /// Bearer token present but rejected (403).
    #[error("forbidden: {0}")]
    Forbidden(#[from] TokenError),

    /// Data proxy could not reach or decode the public API (500).
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),

    /// Anything else (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::DuplicateAccount => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::UpstreamFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidInput => Self::InvalidInput,
            AccountError::DuplicateAccount(_) => Self::DuplicateAccount,
            AccountError::Hashing(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Unauthorized => status.into_response(),
            Self::Forbidden(ref e) => {
                tracing::warn!("Rejected bearer token: {}", e);
                status.into_response()
            }
            Self::UpstreamFailure(ref msg) => {
                tracing::error!("Error fetching data: {}", msg);
                (status, Json(json!({ "error": "Internal Server Error" }))).into_response()
            }
            Self::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (status, "Something broke!").into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}
