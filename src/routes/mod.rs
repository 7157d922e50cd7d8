// # Routes Module
//
// - HTTP route handlers, grouped by functionality.
// - Routers are assembled in `server.rs`.

/// Health check endpoint
pub mod health;

/// Account endpoints: register, login, secure, logout
pub mod auth;

/// Public API data proxy
pub mod data;
