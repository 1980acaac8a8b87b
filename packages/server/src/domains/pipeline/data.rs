use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::common::{PipelineError, PipelineResult};
use crate::domains::extraction::{ActiveIncident, EvacuationCenter, ExtractedData, ReliefOperation};
use crate::domains::reports::{ActionItem, DisasterReport};
use crate::domains::social::SocialPost;
use crate::domains::weather::WeatherSnapshot;

pub const DEFAULT_DISASTER_TYPE: &str = "flood";
pub const DEFAULT_LOCATION: &str = "East District";
pub const DEFAULT_URL: &str = "https://example.com";
pub const DEFAULT_LAT: f64 = 85.123;
pub const DEFAULT_LON: f64 = 25.456;

/// Body of `POST /process-disaster-data/`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessRequest {
    pub disaster_type: String,
    pub location: String,
    pub url: String,
    pub lat: f64,
    pub lon: f64,
    pub train: bool,
}

impl Default for ProcessRequest {
    fn default() -> Self {
        Self {
            disaster_type: DEFAULT_DISASTER_TYPE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            url: DEFAULT_URL.to_string(),
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
            train: false,
        }
    }
}

impl ProcessRequest {
    /// Lower-case the disaster type, trim text fields, and reject unusable input.
    pub fn normalized(mut self) -> PipelineResult<Self> {
        self.disaster_type = self.disaster_type.trim().to_lowercase();
        self.location = self.location.trim().to_string();
        self.url = self.url.trim().to_string();

        if self.disaster_type.is_empty() {
            return Err(PipelineError::Validation("disaster_type must not be empty".into()));
        }
        if self.location.is_empty() {
            return Err(PipelineError::Validation("location must not be empty".into()));
        }
        match url::Url::parse(&self.url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            _ => {
                return Err(PipelineError::Validation(format!(
                    "url must be an absolute http(s) URL, got {:?}",
                    self.url
                )))
            }
        }
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(PipelineError::Validation(format!(
                "coordinates out of range: lat {}, lon {}",
                self.lat, self.lon
            )));
        }
        Ok(self)
    }
}

/// A ranked social post as shown to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct SocialInsight {
    pub title: String,
    pub text: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub score: i64,
    pub relevance_score: i32,
}

impl From<&SocialPost> for SocialInsight {
    fn from(post: &SocialPost) -> Self {
        Self {
            title: post.title.clone(),
            text: post.text.clone(),
            author: post.author.clone(),
            created_at: post.created_at,
            url: post.permalink.clone(),
            score: post.upvotes,
            relevance_score: post.relevance,
        }
    }
}

/// Response of both pipeline endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DisasterResponse {
    pub report_id: Uuid,
    pub disaster_type: String,
    pub location: String,
    pub affected_districts: Vec<String>,
    pub affected_population: u64,
    pub evacuation_centers: Vec<EvacuationCenter>,
    pub disaster_specific_data: Map<String, Value>,
    pub most_affected_areas: Vec<String>,
    pub relief_operations: Vec<ReliefOperation>,
    pub active_incidents: Vec<ActiveIncident>,
    pub social_media_insights: Vec<SocialInsight>,
    pub weather: Option<WeatherSnapshot>,
    pub detailed_report: String,
    pub action_plan: Vec<ActionItem>,
    pub severity_index: f64,
}

impl DisasterResponse {
    pub fn assemble(
        extracted: ExtractedData,
        report: DisasterReport,
        social_posts: &[SocialPost],
        weather: Option<WeatherSnapshot>,
    ) -> Self {
        Self {
            report_id: report.id,
            disaster_type: extracted.disaster_type,
            location: report.location,
            affected_districts: extracted.affected_districts,
            affected_population: extracted.affected_population,
            evacuation_centers: extracted.evacuation_centers,
            disaster_specific_data: extracted.disaster_specific_data,
            most_affected_areas: extracted.most_affected_areas,
            relief_operations: extracted.relief_operations,
            active_incidents: extracted.active_incidents,
            social_media_insights: social_posts.iter().map(SocialInsight::from).collect(),
            weather,
            detailed_report: report.report,
            action_plan: report.action_plan.0,
            severity_index: report.severity_index,
        }
    }
}
