//! Server dependencies for domain actions (using traits for testability)
//!
//! Every external service sits behind a `Base*` trait so tests can swap in
//! the mocks from `test_dependencies`.

use std::sync::Arc;

use anyhow::{Context, Result};
use gemini_client::GeminiClient;
use reddit_client::{RedditClient, RedditCredentials};
use sqlx::PgPool;

use super::{
    BaseAI, BaseFeedFetcher, BasePlacesService, BaseSocialSearch, BaseStore, BaseWeatherService,
    BaseWebScraper, GeminiAI, GooglePlacesClient, HttpFeedFetcher, OpenWeatherClient,
    PostgresStore, RedditSearch, SimpleScraper,
};
use crate::config::Config;

/// Non-secret knobs the pipeline reads at request time
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub alert_feed_url: String,
    /// Region feed is optional; `/scrape-regions/` fails when unset
    pub region_feed_url: Option<String>,
    /// Train the severity classifier on every request, not only when asked
    pub train_classifier: bool,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            alert_feed_url: config.alert_feed_url.clone(),
            region_feed_url: config.region_feed_url.clone(),
            train_classifier: config.train_classifier,
        }
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseStore>,
    pub ai: Arc<dyn BaseAI>,
    pub weather: Arc<dyn BaseWeatherService>,
    pub scraper: Arc<dyn BaseWebScraper>,
    pub social: Arc<dyn BaseSocialSearch>,
    pub feeds: Arc<dyn BaseFeedFetcher>,
    pub places: Arc<dyn BasePlacesService>,
    pub settings: PipelineSettings,
}

impl ServerDeps {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn BaseStore>,
        ai: Arc<dyn BaseAI>,
        weather: Arc<dyn BaseWeatherService>,
        scraper: Arc<dyn BaseWebScraper>,
        social: Arc<dyn BaseSocialSearch>,
        feeds: Arc<dyn BaseFeedFetcher>,
        places: Arc<dyn BasePlacesService>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            store,
            ai,
            weather,
            scraper,
            social,
            feeds,
            places,
            settings,
        }
    }

    /// Wire production adapters from configuration
    pub fn from_config(config: &Config, pool: PgPool) -> Result<Self> {
        let retry = config.retry;

        let gemini =
            GeminiClient::new(config.gemini_api_key.clone()).with_model(config.gemini_model.clone());

        let reddit = RedditClient::new(RedditCredentials {
            client_id: config.reddit_client_id.clone(),
            client_secret: config.reddit_client_secret.clone(),
            user_agent: config.reddit_user_agent.clone(),
        });

        let weather = OpenWeatherClient::new(config.openweather_api_key.clone(), retry)
            .context("Failed to create weather client")?;
        let scraper = SimpleScraper::new(retry).context("Failed to create page scraper")?;
        let feeds = HttpFeedFetcher::new(retry).context("Failed to create feed fetcher")?;
        let places = GooglePlacesClient::new(config.gcp_api_key.clone(), retry)
            .context("Failed to create places client")?;

        Ok(Self::new(
            Arc::new(PostgresStore::new(pool)),
            Arc::new(GeminiAI::new(gemini, retry)),
            Arc::new(weather),
            Arc::new(scraper),
            Arc::new(RedditSearch::new(reddit, retry)),
            Arc::new(feeds),
            Arc::new(places),
            PipelineSettings::from_config(config),
        ))
    }
}
