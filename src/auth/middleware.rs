//! Authentication Middleware
//!
//! Axum middleware for bearer token validation. A missing token is rejected
//! with 401, a token that fails verification with 403.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::error::AppError;

/// Authentication middleware that validates bearer tokens and injects the identity
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Middleware function for validating bearer tokens
    pub async fn validate_token(
        State(tokens): State<Arc<TokenService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        let Some(token) = bearer_token(req.headers()) else {
            tracing::warn!("[AuthMiddleware] Missing bearer token: {} {}", req.method(), req.uri());
            return Err(AppError::Unauthorized);
        };

        let identity = tokens.verify(token)?;
        tracing::debug!("[AuthMiddleware] Token verified for {}", identity.username);

        // Downstream handlers read this with `Extension<Identity>`
        req.extensions_mut().insert(identity);

        Ok(next.run(req).await)
    }
}

/// Token segment of an `Authorization: Bearer <token>` header, if any.
///
/// Only the exact `Bearer` scheme counts. `Basic abc`, `Token abc` or a
/// lowercase `bearer abc` are treated as no token at all (401), not as a
/// token that failed verification (403).
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
