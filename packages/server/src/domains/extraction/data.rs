use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::domains::scraping::ScrapedPage;
use crate::domains::social::SocialPost;
use crate::domains::weather::WeatherSnapshot;

/// Raw alert feed text is cut to this many bytes before it reaches a prompt.
pub const MAX_ALERT_FEED_BYTES: usize = 8_000;

// =============================================================================
// Input
// =============================================================================

/// Everything gathered about one disaster, as handed to the model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisasterData {
    pub disaster_type: String,
    pub location: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub news_articles: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disaster_events: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ai_reports: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weather_data: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scraped_pages: Vec<ScrapedPage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub social_posts: Vec<SocialPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_feed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

impl DisasterData {
    pub fn new(disaster_type: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            disaster_type: disaster_type.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    /// Attach a raw alert feed payload, truncated for prompt size.
    pub fn with_alert_feed(mut self, payload: &Value) -> Self {
        let text = payload.to_string();
        self.alert_feed = Some(
            gemini_client::truncate_to_char_boundary(&text, MAX_ALERT_FEED_BYTES).to_string(),
        );
        self
    }
}

// =============================================================================
// LLM Response Types
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EvacuationCenter {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub location: String,
    /// Number of people the centre can hold
    #[serde(deserialize_with = "lenient::count")]
    #[schemars(with = "u64")]
    pub capacity: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReliefOperation {
    #[serde(deserialize_with = "lenient::or_default")]
    pub operation: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub status: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ActiveIncident {
    #[serde(deserialize_with = "lenient::string")]
    #[schemars(with = "String")]
    pub incident_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub location: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub severity: String,
}

/// Structured facts the model pulls out of [`DisasterData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractedData {
    /// Primary disaster type, e.g. "flood" or "earthquake"
    #[serde(deserialize_with = "lenient::or_default")]
    pub disaster_type: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub affected_districts: Vec<String>,
    /// Estimated number of people affected
    #[serde(deserialize_with = "lenient::count")]
    #[schemars(with = "u64")]
    pub affected_population: u64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub evacuation_centers: Vec<EvacuationCenter>,
    /// Measurements specific to the disaster type (rainfall, magnitude, wind speed...)
    #[serde(deserialize_with = "lenient::or_default")]
    pub disaster_specific_data: Map<String, Value>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub most_affected_areas: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub relief_operations: Vec<ReliefOperation>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub active_incidents: Vec<ActiveIncident>,
    /// Overall severity from 0 (none) to 10 (catastrophic)
    #[serde(deserialize_with = "lenient::optional_float")]
    #[schemars(with = "Option<f64>")]
    pub severity_index: Option<f64>,
}
