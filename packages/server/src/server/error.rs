//! HTTP mapping for pipeline errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::common::PipelineError;

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PipelineError::Validation(message) => {
                warn!(error = %message, "Rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            other => {
                error!(kind = other.kind(), error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = PipelineError::Validation("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_failure_maps_to_server_error() {
        let response = PipelineError::unavailable("language model", "down").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
