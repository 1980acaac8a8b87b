//! Application setup and router configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    health_handler, nearby_places_handler, process_disaster_handler, process_fixture_handler,
    scrape_alerts_handler, scrape_regions_handler, welcome_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Build the Axum application router
///
/// An empty `allowed_origins` list allows any origin.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let state = AppState { deps };

    Router::new()
        .route("/", get(welcome_handler))
        .route(
            "/process-disaster-data/",
            post(process_disaster_handler).get(process_fixture_handler),
        )
        .route("/test-disaster-data/", get(process_fixture_handler))
        .route("/scrape-alerts/", post(scrape_alerts_handler))
        .route("/scrape-regions/", post(scrape_regions_handler))
        .route("/nearby-places/", get(nearby_places_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
