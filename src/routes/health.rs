use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
///
/// # Examples
/// ```bash
/// curl http://localhost:3000/ping
/// # Response: {"status":"pong"}
/// ```
#[utoipa::path(
    get,
    path = "/ping",
    responses((status = 200, description = "Server is up")),
    tag = "health"
)]
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong" }))
}
