//! Filtered pass-through of the public API entry list

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::server::AppState;
use crate::services::{ApiEntry, filter_entries};

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// Fetch the upstream entries, optionally filtered by category and truncated.
#[utoipa::path(
    get,
    path = "/api/data",
    params(
        ("category" = Option<String>, Query, description = "Case-insensitive category match"),
        ("limit" = Option<usize>, Query, description = "Maximum number of entries returned"),
    ),
    responses(
        (status = 200, description = "Filtered entries"),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Upstream API failure"),
    ),
    tag = "data"
)]
pub async fn get_data(
    State(app_state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<Vec<ApiEntry>>, AppError> {
    let entries = app_state.proxy.fetch_entries().await?;

    Ok(Json(filter_entries(
        entries,
        query.category.as_deref(),
        query.limit,
    )))
}
