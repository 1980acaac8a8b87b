//! Plain JSON feed fetcher for alert and region endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::BaseFeedFetcher;
use crate::common::errors::{from_reqwest, from_status};
use crate::common::{PipelineError, PipelineResult, RetryPolicy};

const SERVICE: &str = "alert feed";

pub struct HttpFeedFetcher {
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpFeedFetcher {
    pub fn new(retry: RetryPolicy) -> PipelineResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| from_reqwest(SERVICE, e))?;
        Ok(Self { http, retry })
    }

    async fn fetch_once(&self, url: &str) -> PipelineResult<Value> {
        let response = self
            .http
            .get(url)
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
impl BaseFeedFetcher for HttpFeedFetcher {
    async fn fetch_json(&self, url: &str) -> PipelineResult<Value> {
        self.retry.run(SERVICE, || self.fetch_once(url)).await
    }
}
