use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::domains::alerts::{scrape_alerts, scrape_regions};
use crate::server::app::AppState;

pub async fn scrape_alerts_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<Value>) {
    match scrape_alerts(&state.deps).await {
        Ok(saved) => (
            StatusCode::CREATED,
            Json(json!({ "message": format!("{} new alerts saved.", saved) })),
        ),
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Alert scrape failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch alerts" })),
            )
        }
    }
}

pub async fn scrape_regions_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<Value>) {
    match scrape_regions(&state.deps).await {
        Ok(saved) => (
            StatusCode::CREATED,
            Json(json!({ "message": format!("{} new regions saved.", saved) })),
        ),
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Region scrape failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch regions" })),
            )
        }
    }
}
