//! Weather domain - current conditions attached to scraped pages

pub mod actions;
pub mod snapshot;

pub use actions::fetch_weather;
pub use snapshot::{WeatherSnapshot, WeatherStatus};
