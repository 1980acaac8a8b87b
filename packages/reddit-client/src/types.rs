use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Script-app credentials for application-only OAuth.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

/// Sort order for subreddit search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::Relevance => "relevance",
            SearchSort::Hot => "hot",
            SearchSort::Top => "top",
            SearchSort::New => "new",
            SearchSort::Comments => "comments",
        }
    }
}

/// Time window for subreddit search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::Hour => "hour",
            TimeFilter::Day => "day",
            TimeFilter::Week => "week",
            TimeFilter::Month => "month",
            TimeFilter::Year => "year",
            TimeFilter::All => "all",
        }
    }
}

/// Search request scoped to one or more subreddits.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Subreddit names without the `r/` prefix
    pub subreddits: Vec<String>,
    pub query: String,
    pub sort: SearchSort,
    pub time_filter: TimeFilter,
    /// Reddit caps this at 100
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(subreddits: Vec<String>, query: impl Into<String>) -> Self {
        Self {
            subreddits,
            query: query.into(),
            sort: SearchSort::Relevance,
            time_filter: TimeFilter::All,
            limit: 25,
        }
    }

    pub fn sort(mut self, sort: SearchSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn time_filter(mut self, time_filter: TimeFilter) -> Self {
        self.time_filter = time_filter;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(100);
        self
    }

    /// Multi-subreddit path segment, e.g. `news+worldnews`.
    pub fn subreddit_path(&self) -> String {
        self.subreddits.join("+")
    }
}

/// A link submission (`t3`) from a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub is_self: bool,
    /// `None` for deleted accounts
    pub author: Option<String>,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub score: i64,
}

impl Submission {
    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.created_utc as i64, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Absolute URL of the comments page.
    pub fn permalink_url(&self) -> String {
        format!("https://reddit.com{}", self.permalink)
    }
}

/// Listing envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thing {
    pub kind: String,
    pub data: serde_json::Value,
}

/// OAuth token response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_capped() {
        let req = SearchRequest::new(vec!["news".into()], "flood").limit(500);
        assert_eq!(req.limit, 100);
    }

    #[test]
    fn test_subreddit_path() {
        let req = SearchRequest::new(vec!["news".into(), "worldnews".into()], "q");
        assert_eq!(req.subreddit_path(), "news+worldnews");
    }

    #[test]
    fn test_submission_defaults_and_permalink() {
        let sub: Submission = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "title": "Flooding in East District",
            "author": null,
            "created_utc": 1711700000.0,
            "permalink": "/r/news/comments/abc/flooding/"
        }))
        .unwrap();

        assert!(!sub.is_self);
        assert!(sub.author.is_none());
        assert_eq!(sub.permalink_url(), "https://reddit.com/r/news/comments/abc/flooding/");
        assert_eq!(sub.created_at().timestamp(), 1711700000);
    }
}
