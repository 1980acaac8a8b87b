//! Pure Reddit REST API client.
//!
//! Application-only OAuth (client credentials) plus subreddit search. The
//! access token is cached until shortly before it expires.
//!
//! # Example
//!
//! ```rust,ignore
//! use reddit_client::{RedditClient, RedditCredentials, SearchRequest, SearchSort, TimeFilter};
//!
//! let client = RedditClient::new(credentials);
//! let request = SearchRequest::new(vec!["news".into(), "floods".into()], "flood East District")
//!     .sort(SearchSort::New)
//!     .time_filter(TimeFilter::Week)
//!     .limit(20);
//! for post in client.search(&request).await? {
//!     println!("{} ({})", post.title, post.score);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{RedditError, Result};
pub use types::{RedditCredentials, SearchRequest, SearchSort, Submission, TimeFilter};

use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use types::{Listing, TokenResponse};

const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_URL: &str = "https://oauth.reddit.com";

/// Refresh this long before the token actually expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

pub struct RedditClient {
    client: reqwest::Client,
    credentials: RedditCredentials,
    auth_url: String,
    api_url: String,
    token: RwLock<Option<CachedToken>>,
}

impl RedditClient {
    pub fn new(credentials: RedditCredentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            auth_url: AUTH_URL.to_string(),
            api_url: API_URL.to_string(),
            token: RwLock::new(None),
        }
    }

    /// Point the client at different endpoints (test servers).
    pub fn with_urls(mut self, auth_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RedditError::Config(e.to_string()))?;
        Ok(self)
    }

    /// Return a valid access token, fetching a new one if needed.
    async fn access_token(&self) -> Result<String> {
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.access_token.clone());
            }
        }

        let mut guard = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.access_token.clone());
            }
        }

        tracing::debug!("Requesting Reddit application-only token");
        let resp = self
            .client
            .post(&self.auth_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .header(reqwest::header::USER_AGENT, &self.credentials.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: TokenResponse = resp.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *guard = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    /// Search submissions restricted to the request's subreddits.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Submission>> {
        if request.subreddits.is_empty() {
            return Err(RedditError::Config("search needs at least one subreddit".into()));
        }

        let token = self.access_token().await?;
        let url = format!("{}/r/{}/search", self.api_url, request.subreddit_path());
        let limit = request.limit.to_string();

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header(reqwest::header::USER_AGENT, &self.credentials.user_agent)
            .query(&[
                ("q", request.query.as_str()),
                ("restrict_sr", "1"),
                ("sort", request.sort.as_str()),
                ("t", request.time_filter.as_str()),
                ("limit", limit.as_str()),
                ("raw_json", "1"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            // Token revoked early; drop it so the next call re-authenticates.
            *self.token.write().await = None;
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let listing: Listing = resp.json().await?;
        let submissions: Vec<Submission> = listing
            .data
            .children
            .into_iter()
            .filter(|thing| thing.kind == "t3")
            .filter_map(|thing| match serde_json::from_value(thing.data) {
                Ok(submission) => Some(submission),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed submission");
                    None
                }
            })
            .collect();

        tracing::info!(
            subreddits = %request.subreddit_path(),
            count = submissions.len(),
            "Fetched Reddit submissions"
        );

        Ok(submissions)
    }
}
