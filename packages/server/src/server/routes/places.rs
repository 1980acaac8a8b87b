use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde_json::Value;

use crate::common::{PipelineError, PipelineResult};
use crate::domains::places::{find_nearby_places, NearbyQuery};
use crate::server::app::AppState;

/// Places of one type around a coordinate, passed through from the upstream
pub async fn nearby_places_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> PipelineResult<Json<Value>> {
    let Query(query) = query
        .map_err(|e| PipelineError::Validation(format!("invalid query: {}", e.body_text())))?;
    let places = find_nearby_places(&query, &state.deps).await?;
    Ok(Json(places))
}
