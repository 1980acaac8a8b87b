use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::common::{DisasterType, PipelineError, PipelineResult};
use crate::domains::pipeline::{
    data::DEFAULT_DISASTER_TYPE, process_disaster_data, process_fixture, DisasterResponse,
    ProcessRequest,
};
use crate::server::app::AppState;

pub const WELCOME_TEXT: &str =
    "Welcome to RESQNET! Use the /process-disaster-data/ endpoint to process disaster data.";

pub async fn welcome_handler() -> &'static str {
    WELCOME_TEXT
}

/// Run the full pipeline. An empty body uses every default.
pub async fn process_disaster_handler(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> PipelineResult<Json<DisasterResponse>> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ProcessRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| PipelineError::Validation(format!("invalid request body: {}", e)))?
    };

    let response = process_disaster_data(request, &state.deps).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct FixtureQuery {
    pub disaster_type: Option<String>,
}

/// Run a canned fixture through extraction and reporting.
pub async fn process_fixture_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<FixtureQuery>,
) -> PipelineResult<Json<DisasterResponse>> {
    let requested = query
        .disaster_type
        .unwrap_or_else(|| DEFAULT_DISASTER_TYPE.to_string());
    let disaster_type = DisasterType::from_str(&requested)?;

    let response = process_fixture(disaster_type, &state.deps).await?;
    Ok(Json(response))
}
