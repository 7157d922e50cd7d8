//! # Access Gate
//!
//! Small HTTP service with account registration, bearer-token login, a
//! token-protected route, and a filtered proxy over a public API listing.
//!
//! ## Architecture
//! - `config`: environment configuration, loaded once at startup
//! - `auth`: credential store, token service, and auth middleware
//! - `routes`: HTTP handlers (`auth`, `data`, `health`)
//! - `services`: outbound data proxy
//! - `openapi`: generated API documentation
//! - `server`: state wiring, router assembly and the listener
//!
//! ## Running the Server
//! ```bash
//! JWT_SECRET=change-me cargo run
//! ```
//!
//! The server listens on `0.0.0.0:$PORT` (default 3000). Startup fails if
//! `JWT_SECRET` is not set.

mod auth;
mod config;
mod error;
mod openapi;
mod routes;
mod server;
mod services;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env if present; real environment variables win
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!("🏁 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().inspect_err(|e| {
        tracing::error!("Invalid configuration: {:#}", e);
    })?;

    server::start(config).await
}
