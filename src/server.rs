//! # Server Module
//!
//! HTTP server setup and route configuration.

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::{Any, CorsLayer}, trace::TraceLayer};

use crate::auth::jwt::TokenService;
use crate::auth::middleware::AuthMiddleware;
use crate::auth::store::{CredentialStore, InMemoryCredentialStore};
use crate::config::Config;
use crate::routes;
use crate::services::DataProxy;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub tokens: Arc<TokenService>,
    pub proxy: Arc<DataProxy>,
}

impl AppState {
    /// Wire up the default in-memory store, token service and data proxy
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            store: Arc::new(InMemoryCredentialStore::new()),
            tokens: Arc::new(TokenService::new(&config.jwt_secret, config.token_ttl)),
            proxy: Arc::new(DataProxy::new(
                config.upstream.url.clone(),
                config.upstream.timeout,
            )?),
        })
    }
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/secure", get(routes::auth::secure))
        .layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            AuthMiddleware::validate_token,
        ));

    let app = Router::new()
        .route("/ping", get(routes::health::ping))
        .route("/api/data", get(routes::data::get_data))
        .merge(routes::auth::create_auth_routes())
        .merge(protected)
        .merge(crate::openapi::routes())
        .with_state(state);

    with_service_layers(app)
}

/// Request tracing, panic-to-500 conversion and CORS, outermost first.
fn with_service_layers(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::new())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([
                        header::ORIGIN,
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                        header::AUTHORIZATION,
                    ]),
            ),
    )
}

/// Starts the HTTP server and runs until Ctrl+C.
pub async fn start(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid SERVER_HOST/PORT")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("🚀 Server is running on http://{}", addr);
    tracing::info!("📖 OpenAPI document at http://{}/api-docs/openapi.json", addr);
    tracing::info!("⏳ Access tokens expire after {} minutes", config.token_ttl.as_secs() / 60);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
