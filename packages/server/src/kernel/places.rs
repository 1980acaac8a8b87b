//! Google Places "searchNearby" client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::BasePlacesService;
use crate::common::errors::{from_reqwest, from_status};
use crate::common::{PipelineError, PipelineResult, RetryPolicy};
use crate::domains::places::NearbyQuery;

const SERVICE: &str = "places";
pub const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
const MAX_RESULTS: u32 = 10;

pub struct GooglePlacesClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>, retry: RetryPolicy) -> PipelineResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| from_reqwest(SERVICE, e))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: PLACES_BASE_URL.to_string(),
            retry,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_body(query: &NearbyQuery) -> Value {
        json!({
            "includedTypes": [query.place_type],
            "maxResultCount": MAX_RESULTS,
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": query.lat, "longitude": query.lon },
                    "radius": query.radius
                }
            }
        })
    }

    async fn search_once(&self, query: &NearbyQuery) -> PipelineResult<Value> {
        let response = self
            .http
            .post(format!("{}/places:searchNearby", self.base_url))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", "*")
            .json(&Self::request_body(query))
            .send()
            .await
            .map_err(|e| from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(from_status(SERVICE, status));
        }

        response
            .json()
            .await
            .map_err(|e| PipelineError::malformed(SERVICE, e.without_url().to_string()))
    }
}

#[async_trait]
impl BasePlacesService for GooglePlacesClient {
    async fn search_nearby(&self, query: &NearbyQuery) -> PipelineResult<Value> {
        self.retry.run(SERVICE, || self.search_once(query)).await
    }
}
