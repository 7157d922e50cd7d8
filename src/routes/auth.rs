//! Auth routes for registration, login, the protected greeting, and logout

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Extension, Json, Router};

use crate::auth::models::{CredentialsRequest, Identity, TokenResponse};
use crate::error::AppError;
use crate::server::AppState;

fn credentials(
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(String, String), AppError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Rejected credentials body: {}", rejection);
        AppError::InvalidInput
    })?;
    body.into_parts().ok_or(AppError::InvalidInput)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User registered successfully", body = String),
        (status = 400, description = "Username or password missing"),
        (status = 409, description = "Username already exists"),
    ),
    tag = "auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (username, password) = credentials(payload)?;

    app_state.store.register(&username, &password).await?;
    tracing::info!("{} accounts registered", app_state.store.len().await);

    Ok((StatusCode::CREATED, "User registered successfully"))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let (username, password) = credentials(payload)?;

    let Some(account) = app_state.store.find(&username, &password).await else {
        tracing::info!("Failed login attempt for {}", username);
        return Err(AppError::InvalidCredentials);
    };

    let access_token = app_state
        .tokens
        .issue(&account.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(
        "Issued access token for {} (registered {})",
        account.username,
        account.created_at.to_rfc3339()
    );
    Ok(Json(TokenResponse { access_token }))
}

/// Greeting for the authenticated caller
#[utoipa::path(
    get,
    path = "/secure",
    responses(
        (status = 200, description = "Greeting for the token's subject", body = String),
        (status = 401, description = "No bearer token"),
        (status = 403, description = "Bearer token invalid or expired"),
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn secure(Extension(identity): Extension<Identity>) -> String {
    format!("Welcome, {}! This is a secure route.", identity.username)
}

/// Stateless logout; issued tokens stay valid until they expire.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Logged out successfully", body = String)),
    tag = "auth"
)]
pub async fn logout() -> &'static str {
    "Logged out successfully"
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}
