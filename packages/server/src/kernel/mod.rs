//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod feeds;
pub mod gemini;
pub mod places;
pub mod reddit;
pub mod simple_scraper;
pub mod store;
pub mod test_dependencies;
pub mod traits;
pub mod weather;

pub use deps::{PipelineSettings, ServerDeps};
pub use feeds::HttpFeedFetcher;
pub use gemini::GeminiAI;
pub use places::GooglePlacesClient;
pub use reddit::RedditSearch;
pub use simple_scraper::SimpleScraper;
pub use store::PostgresStore;
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use weather::OpenWeatherClient;
