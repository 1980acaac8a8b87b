use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::ScrapedPage;
use crate::common::{PipelineError, PipelineResult};
use crate::domains::weather::fetch_weather;
use crate::kernel::{PageContent, ServerDeps};

pub const FALLBACK_TITLE: &str = "Mock Disaster Title";
pub const FALLBACK_DESCRIPTION: &str = "Mock disaster description due to scraping failure.";
pub const FALLBACK_BODY: &str = "Mock disaster content due to scraping failure.";

#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub url: String,
    pub disaster_type: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Scrape a page, attach current weather, and persist the result.
///
/// An unreachable page is replaced with placeholder content so the pipeline
/// can continue; a failed insert is returned as an error.
pub async fn scrape_page(request: &ScrapeRequest, deps: &ServerDeps) -> PipelineResult<ScrapedPage> {
    info!(url = %request.url, disaster_type = %request.disaster_type, "Scraping page");

    let content = match deps.scraper.scrape(&request.url).await {
        Ok(content) => content,
        Err(e) => {
            warn!(url = %request.url, error = %e, "Scrape failed, using placeholder content");
            PageContent {
                url: request.url.clone(),
                title: FALLBACK_TITLE.to_string(),
                description: FALLBACK_DESCRIPTION.to_string(),
                body: FALLBACK_BODY.to_string(),
                published_at: None,
            }
        }
    };

    let weather = fetch_weather(request.latitude, request.longitude, deps).await;
    let weather_data = serde_json::to_string(&weather)
        .map_err(|e| PipelineError::Persistence(e.to_string()))?;

    let page = ScrapedPage {
        id: Uuid::now_v7(),
        url: request.url.clone(),
        title: content.title,
        description: content.description,
        body: content.body,
        published_at: content.published_at,
        location: request.location.clone(),
        latitude: request.latitude,
        longitude: request.longitude,
        disaster_type: request.disaster_type.clone(),
        weather_data,
        scraped_at: Utc::now(),
    };

    deps.store.insert_scraped_page(&page).await?;
    Ok(page)
}
