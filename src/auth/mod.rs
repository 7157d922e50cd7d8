//! # Authentication Module
//!
//! Credential storage, access token issuance and verification, and the
//! middleware that guards protected routes.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod store;
