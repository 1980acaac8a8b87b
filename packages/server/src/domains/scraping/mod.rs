//! Scraping domain - single-page scrape with weather context

pub mod actions;
pub mod models;

pub use actions::{scrape_page, ScrapeRequest};
pub use models::ScrapedPage;
