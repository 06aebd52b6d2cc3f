use anyhow::Context;
use axum::{
    Json,
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use eduzone_core::{ApiResponse, AppError};

use crate::state::AppState;

use super::model::{ApiIndex, HealthStatus};

/// List the available endpoints
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "API name, version and endpoint groups", body = ApiIndex)
    ),
    tag = "System"
)]
pub async fn api_index() -> ApiResponse<ApiIndex> {
    ApiResponse::new(ApiIndex::current())
}

/// Check that the persistence backend answers
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Backend reachable", body = HealthStatus),
        (status = 500, description = "Database is not reachable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<ApiResponse<HealthStatus>, AppError> {
    state
        .repos
        .ping()
        .await
        .context("Database is not reachable")?;

    Ok(ApiResponse::new(HealthStatus {
        status: "ok",
        backend: state.repos.backend_name(),
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    debug!(path = %path, "No route matched");

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "message": "Route not found",
                "path": path,
            }
        })),
    )
}
