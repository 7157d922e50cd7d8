//! # OpenAPI Document
//!
//! Assembles the documented routes into one OpenAPI document served at
//! `/api-docs/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::server::AppState;

/// Adds the bearer token security scheme referenced by `/secure`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Documentation",
        version = "1.0.0",
        description = "Account registration, token login, a bearer-protected route, and a filtered public API proxy."
    ),
    servers((url = "http://localhost:3000", description = "Development server")),
    paths(
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::secure,
        crate::routes::auth::logout,
        crate::routes::data::get_data,
        crate::routes::health::ping,
    ),
    components(schemas(
        crate::auth::models::CredentialsRequest,
        crate::auth::models::TokenResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and protected access"),
        (name = "data", description = "Public API proxy"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for path in ["/register", "/login", "/secure", "/logout", "/api/data", "/ping"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_secure_route_requires_bearer() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert_eq!(
            doc["components"]["securitySchemes"]["bearer_auth"]["scheme"],
            "bearer"
        );
        assert!(doc["paths"]["/secure"]["get"]["security"].is_array());
        assert!(doc["paths"]["/register"]["post"]["security"].is_null());
    }
}
