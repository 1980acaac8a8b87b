use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::PoolStats;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: DatabaseHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    connection_pool: Option<PoolStats>,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Returns 200 OK when the database answers within 5s, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let health = state.deps.store.health().await;

    let (status_code, overall_status, db_status) = if health.healthy {
        (StatusCode::OK, "healthy", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "error")
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            database: DatabaseHealth {
                status: db_status.to_string(),
                error: health.error,
            },
            connection_pool: health.pool,
        }),
    )
}
