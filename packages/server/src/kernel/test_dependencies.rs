// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reddit_client::{SearchRequest, Submission};
use serde_json::{json, Value};

use super::{
    BaseAI, BaseFeedFetcher, BasePlacesService, BaseSocialSearch, BaseStore, BaseWeatherService,
    BaseWebScraper, PageContent, PipelineSettings, ServerDeps, StoreHealth,
};
use crate::common::{PipelineError, PipelineResult};
use crate::config::DEFAULT_ALERT_FEED_URL;
use crate::domains::alerts::models::{Alert, Region};
use crate::domains::extraction::models::FormattedSample;
use crate::domains::places::NearbyQuery;
use crate::domains::reports::models::DisasterReport;
use crate::domains::scraping::models::ScrapedPage;
use crate::domains::social::models::SocialPost;
use crate::domains::weather::WeatherSnapshot;

// =============================================================================
// Mock AI
// =============================================================================

/// Canned extraction the mock returns for extraction prompts
pub fn canned_extraction() -> Value {
    json!({
        "disaster_type": "flood",
        "affected_districts": ["East District"],
        "affected_population": 12000,
        "evacuation_centers": [
            { "name": "Central School", "location": "East District", "capacity": 500 }
        ],
        "disaster_specific_data": { "water_level": "4.2 m" },
        "most_affected_areas": ["Riverside"],
        "relief_operations": [
            { "operation": "Boat rescue", "status": "ongoing", "resources": ["12 boats"] }
        ],
        "active_incidents": [
            { "incident_id": "INC-1", "location": "Riverside", "severity": "high" }
        ],
        "severity_index": 7.5
    })
}

/// Canned action plan the mock returns for action plan prompts
pub fn canned_action_plan() -> Value {
    json!([
        {
            "priority": "high",
            "timeframe": "immediate",
            "action": "Evacuate low-lying areas",
            "responsible": "District administration",
            "resources_needed": ["Boats", "Buses"],
            "success_criteria": "All residents moved to shelters"
        }
    ])
}

/// Canned training samples the mock returns for sample prompts
pub fn canned_samples() -> Value {
    json!([
        {
            "combined_text": "Severe flooding in East District, thousands displaced",
            "metadata": {
                "severity": 8.0,
                "affected_population": 12000,
                "weather_conditions": "heavy rain",
                "social_sentiment": "distressed"
            }
        },
        {
            "combined_text": "Water receding in parts of Riverside",
            "metadata": {
                "severity": 4.0,
                "affected_population": 3000,
                "weather_conditions": "light rain",
                "social_sentiment": "cautious"
            }
        }
    ])
}

pub const CANNED_REPORT: &str = "Mock AI response";

pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Every call fails as an unavailable upstream
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Queue a response; queued responses are used before canned ones
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).unwrap();
        self.with_response(json)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c.contains(text))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn canned_response(prompt: &str) -> String {
        if prompt.contains("information extraction system") {
            canned_extraction().to_string()
        } else if prompt.contains("structured action plan") {
            canned_action_plan().to_string()
        } else if prompt.contains("disaster data processing agent") {
            canned_samples().to_string()
        } else {
            CANNED_REPORT.to_string()
        }
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> PipelineResult<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(PipelineError::unavailable("language model", message.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok(Self::canned_response(prompt))
        }
    }
}

// =============================================================================
// Mock Weather
// =============================================================================

pub struct MockWeather {
    snapshot: Option<WeatherSnapshot>,
    calls: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl MockWeather {
    pub fn new() -> Self {
        Self {
            snapshot: Some(WeatherSnapshot::live(28.5, 88.0, 5.2, 12.0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_snapshot(mut self, snapshot: WeatherSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn failing() -> Self {
        Self {
            snapshot: None,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<(f64, f64)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockWeather {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWeatherService for MockWeather {
    async fn current(&self, lat: f64, lon: f64) -> PipelineResult<WeatherSnapshot> {
        self.calls.lock().unwrap().push((lat, lon));
        self.snapshot
            .clone()
            .ok_or_else(|| PipelineError::unavailable("weather", "mock weather offline"))
    }
}

// =============================================================================
// Mock Web Scraper
// =============================================================================

pub struct MockScraper {
    page: Option<PageContent>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockScraper {
    pub fn new() -> Self {
        Self {
            page: Some(PageContent {
                url: String::new(),
                title: "Flood waters rise in East District".to_string(),
                description: "Heavy rain has flooded low-lying areas".to_string(),
                body: "Rescue teams are evacuating residents near the river.".to_string(),
                published_at: None,
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_page(mut self, page: PageContent) -> Self {
        self.page = Some(page);
        self
    }

    pub fn failing() -> Self {
        Self {
            page: None,
            ..Self::new()
        }
    }

    pub fn scrape_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_scraped(&self, url: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|u| u == url)
    }
}

impl Default for MockScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWebScraper for MockScraper {
    async fn scrape(&self, url: &str) -> PipelineResult<PageContent> {
        self.calls.lock().unwrap().push(url.to_string());
        match &self.page {
            Some(page) => Ok(PageContent {
                url: url.to_string(),
                ..page.clone()
            }),
            None => Err(PipelineError::unavailable("page scraper", "mock scraper offline")),
        }
    }
}

// =============================================================================
// Mock Social Search
// =============================================================================

/// Build a link submission for tests
pub fn submission(id: &str, title: &str, score: i64, created_at: DateTime<Utc>) -> Submission {
    Submission {
        id: id.to_string(),
        title: title.to_string(),
        selftext: String::new(),
        is_self: false,
        author: Some("reporter".to_string()),
        created_utc: created_at.timestamp() as f64,
        url: format!("https://news.example/{}", id),
        permalink: format!("/r/news/comments/{}/", id),
        subreddit: "news".to_string(),
        score,
    }
}

pub struct MockSocialSearch {
    submissions: Vec<Submission>,
    failing: bool,
    calls: Arc<Mutex<Vec<SearchRequest>>>,
}

impl MockSocialSearch {
    pub fn new() -> Self {
        Self {
            submissions: Vec::new(),
            failing: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_submissions(mut self, submissions: Vec<Submission>) -> Self {
        self.submissions = submissions;
        self
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<SearchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSocialSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSocialSearch for MockSocialSearch {
    async fn search(&self, request: &SearchRequest) -> PipelineResult<Vec<Submission>> {
        self.calls.lock().unwrap().push(request.clone());
        if self.failing {
            return Err(PipelineError::unavailable("social search", "mock search offline"));
        }
        Ok(self.submissions.clone())
    }
}

// =============================================================================
// Mock Feed Fetcher
// =============================================================================

pub struct MockAlertFeed {
    feeds: HashMap<String, Value>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAlertFeed {
    pub fn new() -> Self {
        Self {
            feeds: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `payload` for `url`; any other URL is unavailable
    pub fn with_feed(mut self, url: impl Into<String>, payload: Value) -> Self {
        self.feeds.insert(url.into(), payload);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAlertFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseFeedFetcher for MockAlertFeed {
    async fn fetch_json(&self, url: &str) -> PipelineResult<Value> {
        self.calls.lock().unwrap().push(url.to_string());
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| PipelineError::unavailable("alert feed", "no mock feed for url"))
    }
}

// =============================================================================
// Mock Places
// =============================================================================

pub struct MockPlaces {
    response: Value,
    calls: Arc<Mutex<Vec<NearbyQuery>>>,
}

impl MockPlaces {
    pub fn new() -> Self {
        Self {
            response: json!({ "places": [] }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    pub fn calls(&self) -> Vec<NearbyQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockPlaces {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePlacesService for MockPlaces {
    async fn search_nearby(&self, query: &NearbyQuery) -> PipelineResult<Value> {
        self.calls.lock().unwrap().push(query.clone());
        Ok(self.response.clone())
    }
}

// =============================================================================
// In-memory Store
// =============================================================================

/// Store that keeps rows in memory with the same uniqueness rules as Postgres
#[derive(Default)]
pub struct InMemoryStore {
    pub pages: Mutex<Vec<ScrapedPage>>,
    pub posts: Mutex<Vec<SocialPost>>,
    pub samples: Mutex<Vec<FormattedSample>>,
    pub reports: Mutex<Vec<DisasterReport>>,
    pub alerts: Mutex<Vec<Alert>>,
    pub regions: Mutex<Vec<Region>>,
    unhealthy: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            unhealthy: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_samples(self, samples: Vec<FormattedSample>) -> Self {
        self.samples.lock().unwrap().extend(samples);
        self
    }

    pub fn report_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseStore for InMemoryStore {
    async fn insert_scraped_page(&self, page: &ScrapedPage) -> PipelineResult<()> {
        self.pages.lock().unwrap().push(page.clone());
        Ok(())
    }

    async fn insert_social_posts(&self, posts: &[SocialPost]) -> PipelineResult<u64> {
        let mut stored = self.posts.lock().unwrap();
        let mut inserted = 0;
        for post in posts {
            if !stored.iter().any(|p| p.post_id == post.post_id) {
                stored.push(post.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn insert_formatted_samples(&self, samples: &[FormattedSample]) -> PipelineResult<()> {
        self.samples.lock().unwrap().extend_from_slice(samples);
        Ok(())
    }

    async fn find_formatted_samples(
        &self,
        disaster_type: &str,
        location: &str,
    ) -> PipelineResult<Vec<FormattedSample>> {
        Ok(self
            .samples
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.disaster_type == disaster_type && s.location == location)
            .cloned()
            .collect())
    }

    async fn insert_report(&self, report: &DisasterReport) -> PipelineResult<()> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn insert_alert_if_new(&self, alert: &Alert) -> PipelineResult<bool> {
        let mut alerts = self.alerts.lock().unwrap();
        if alerts.iter().any(|a| a.source_id == alert.source_id) {
            return Ok(false);
        }
        alerts.push(alert.clone());
        Ok(true)
    }

    async fn insert_region_if_new(&self, region: &Region) -> PipelineResult<bool> {
        let mut regions = self.regions.lock().unwrap();
        if regions.iter().any(|r| r.name == region.name) {
            return Ok(false);
        }
        regions.push(region.clone());
        Ok(true)
    }

    async fn health(&self) -> StoreHealth {
        StoreHealth {
            healthy: self.unhealthy.is_none(),
            error: self.unhealthy.clone(),
            pool: None,
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub const TEST_REGION_FEED_URL: &str = "https://feeds.example/regions";

pub struct TestDependencies {
    pub store: Arc<InMemoryStore>,
    pub ai: Arc<MockAI>,
    pub weather: Arc<MockWeather>,
    pub scraper: Arc<MockScraper>,
    pub social: Arc<MockSocialSearch>,
    pub feeds: Arc<MockAlertFeed>,
    pub places: Arc<MockPlaces>,
    pub settings: PipelineSettings,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            ai: Arc::new(MockAI::new()),
            weather: Arc::new(MockWeather::new()),
            scraper: Arc::new(MockScraper::new()),
            social: Arc::new(MockSocialSearch::new()),
            feeds: Arc::new(MockAlertFeed::new()),
            places: Arc::new(MockPlaces::new()),
            settings: PipelineSettings {
                alert_feed_url: DEFAULT_ALERT_FEED_URL.to_string(),
                region_feed_url: Some(TEST_REGION_FEED_URL.to_string()),
                train_classifier: false,
            },
        }
    }

    pub fn mock_store(mut self, store: InMemoryStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    pub fn mock_weather(mut self, weather: MockWeather) -> Self {
        self.weather = Arc::new(weather);
        self
    }

    pub fn mock_scraper(mut self, scraper: MockScraper) -> Self {
        self.scraper = Arc::new(scraper);
        self
    }

    pub fn mock_social(mut self, social: MockSocialSearch) -> Self {
        self.social = Arc::new(social);
        self
    }

    pub fn mock_alert_feed(mut self, feeds: MockAlertFeed) -> Self {
        self.feeds = Arc::new(feeds);
        self
    }

    pub fn mock_places(mut self, places: MockPlaces) -> Self {
        self.places = Arc::new(places);
        self
    }

    pub fn settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build ServerDeps sharing these mocks, so calls stay inspectable
    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.store.clone(),
            self.ai.clone(),
            self.weather.clone(),
            self.scraper.clone(),
            self.social.clone(),
            self.feeds.clone(),
            self.places.clone(),
            self.settings.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
