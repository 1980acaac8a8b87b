// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (ranking, extraction, reporting) lives in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseWebScraper)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reddit_client::{SearchRequest, Submission};
use serde::Serialize;

use crate::common::PipelineResult;
use crate::domains::alerts::models::{Alert, Region};
use crate::domains::extraction::models::FormattedSample;
use crate::domains::places::NearbyQuery;
use crate::domains::reports::models::DisasterReport;
use crate::domains::scraping::models::ScrapedPage;
use crate::domains::social::models::SocialPost;
use crate::domains::weather::WeatherSnapshot;

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> PipelineResult<String>;

    /// Complete a prompt expecting JSON response (returns raw JSON string)
    /// Parse with `common::parse_model_json` in calling code
    async fn complete_json(&self, prompt: &str) -> PipelineResult<String> {
        // Default implementation calls complete
        self.complete(prompt).await
    }
}

// =============================================================================
// Weather Trait
// =============================================================================

#[async_trait]
pub trait BaseWeatherService: Send + Sync {
    /// Current conditions at a coordinate
    async fn current(&self, lat: f64, lon: f64) -> PipelineResult<WeatherSnapshot>;
}

// =============================================================================
// Web Scraper Trait
// =============================================================================

/// Fields pulled out of a single HTML page
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub url: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait BaseWebScraper: Send + Sync {
    /// Fetch a page and extract title, description and body
    async fn scrape(&self, url: &str) -> PipelineResult<PageContent>;
}

// =============================================================================
// Social Search Trait
// =============================================================================

#[async_trait]
pub trait BaseSocialSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> PipelineResult<Vec<Submission>>;
}

// =============================================================================
// JSON Feed Trait (alert and region feeds)
// =============================================================================

#[async_trait]
pub trait BaseFeedFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> PipelineResult<serde_json::Value>;
}

// =============================================================================
// Places Trait
// =============================================================================

#[async_trait]
pub trait BasePlacesService: Send + Sync {
    /// Places of a given type around a coordinate (raw upstream JSON)
    async fn search_nearby(&self, query: &NearbyQuery) -> PipelineResult<serde_json::Value>;
}

// =============================================================================
// Store Trait (Persistence)
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct StoreHealth {
    pub healthy: bool,
    pub error: Option<String>,
    pub pool: Option<PoolStats>,
}

/// All writes are inserts; nothing is updated after creation.
#[async_trait]
pub trait BaseStore: Send + Sync {
    async fn insert_scraped_page(&self, page: &ScrapedPage) -> PipelineResult<()>;

    /// Returns how many posts were new (duplicate post ids are ignored)
    async fn insert_social_posts(&self, posts: &[SocialPost]) -> PipelineResult<u64>;

    async fn insert_formatted_samples(&self, samples: &[FormattedSample]) -> PipelineResult<()>;

    async fn find_formatted_samples(
        &self,
        disaster_type: &str,
        location: &str,
    ) -> PipelineResult<Vec<FormattedSample>>;

    async fn insert_report(&self, report: &DisasterReport) -> PipelineResult<()>;

    /// Returns false when an alert with the same source id already exists
    async fn insert_alert_if_new(&self, alert: &Alert) -> PipelineResult<bool>;

    /// Returns false when a region with the same name already exists
    async fn insert_region_if_new(&self, region: &Region) -> PipelineResult<bool>;

    async fn health(&self) -> StoreHealth;
}
