//! Alerts domain - government warning feeds and affected regions

pub mod actions;
pub mod ingest;
pub mod models;

pub use actions::{fetch_alert_feed, ingest_alerts, ingest_regions, scrape_alerts, scrape_regions};
pub use models::{Alert, AlertType, Region, RegionType};
