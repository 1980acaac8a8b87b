use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::ingest::{parse_alerts, parse_regions};
use crate::common::{PipelineError, PipelineResult};
use crate::kernel::ServerDeps;

/// Fetch the configured alert feed as raw JSON.
pub async fn fetch_alert_feed(deps: &ServerDeps) -> PipelineResult<Value> {
    deps.feeds.fetch_json(&deps.settings.alert_feed_url).await
}

/// Store new alerts from a feed payload. Returns how many were new.
pub async fn ingest_alerts(payload: &Value, deps: &ServerDeps) -> PipelineResult<usize> {
    let alerts = parse_alerts(payload, Utc::now());
    let mut saved = 0;
    for alert in &alerts {
        if deps.store.insert_alert_if_new(alert).await? {
            saved += 1;
        }
    }
    info!(parsed = alerts.len(), saved, "Alerts ingested");
    Ok(saved)
}

/// Store new regions from a feed payload. Returns how many were new.
pub async fn ingest_regions(payload: &Value, deps: &ServerDeps) -> PipelineResult<usize> {
    let regions = parse_regions(payload, Utc::now());
    let mut saved = 0;
    for region in &regions {
        if deps.store.insert_region_if_new(region).await? {
            saved += 1;
        }
    }
    info!(parsed = regions.len(), saved, "Regions ingested");
    Ok(saved)
}

pub async fn scrape_alerts(deps: &ServerDeps) -> PipelineResult<usize> {
    let payload = fetch_alert_feed(deps).await?;
    ingest_alerts(&payload, deps).await
}

pub async fn scrape_regions(deps: &ServerDeps) -> PipelineResult<usize> {
    let Some(url) = deps.settings.region_feed_url.as_deref() else {
        warn!("No region feed configured");
        return Err(PipelineError::rejected(
            "region feed",
            None,
            "REGION_FEED_URL is not configured",
        ));
    };
    let payload = deps.feeds.fetch_json(url).await?;
    ingest_regions(&payload, deps).await
}
