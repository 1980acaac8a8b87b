//! Simple web scraper - local HTTP + HTML parsing
//!
//! Uses reqwest for the request and the scraper crate for fixed tag lookups:
//! first `<h1>`, `<meta name="description">`, first `<article>`.
//! No JavaScript rendering.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use tracing::debug;

use super::{BaseWebScraper, PageContent};
use crate::common::errors::{from_reqwest, from_status};
use crate::common::{PipelineResult, RetryPolicy};

const SERVICE: &str = "page scraper";

pub const NO_TITLE: &str = "No Title";
pub const NO_DESCRIPTION: &str = "No Description";
pub const NO_CONTENT: &str = "No Content";

// Browser-like User-Agent to avoid bot detection
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct SimpleScraper {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl SimpleScraper {
    pub fn new(retry: RetryPolicy) -> PipelineResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );
        headers.insert(reqwest::header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            reqwest::header::UPGRADE_INSECURE_REQUESTS,
            HeaderValue::from_static("1"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| from_reqwest(SERVICE, e))?;

        Ok(Self { client, retry })
    }

    /// Fetch raw HTML from a URL
    async fn fetch_html(&self, url: &str) -> PipelineResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(from_status(SERVICE, status));
        }

        response.text().await.map_err(|e| from_reqwest(SERVICE, e))
    }
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Extract title, description, body and publish time from an HTML page.
pub fn parse_page(url: &str, html: &str) -> PageContent {
    let document = Html::parse_document(html);

    let published_at = meta_content(&document, r#"meta[property="article:published_time"]"#)
        .and_then(|t| DateTime::parse_from_rfc3339(&t).ok())
        .map(|t| t.with_timezone(&Utc));

    PageContent {
        url: url.to_string(),
        title: first_text(&document, "h1").unwrap_or_else(|| NO_TITLE.to_string()),
        description: meta_content(&document, r#"meta[name="description"]"#)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        body: first_text(&document, "article").unwrap_or_else(|| NO_CONTENT.to_string()),
        published_at,
    }
}

#[async_trait]
impl BaseWebScraper for SimpleScraper {
    async fn scrape(&self, url: &str) -> PipelineResult<PageContent> {
        debug!(url = %url, "Scraping page");
        let html = self.retry.run(SERVICE, || self.fetch_html(url)).await?;
        Ok(parse_page(url, &html))
    }
}
