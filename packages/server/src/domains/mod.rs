// Business domains
pub mod alerts;
pub mod classifier;
pub mod extraction;
pub mod pipeline;
pub mod places;
pub mod reports;
pub mod scraping;
pub mod social;
pub mod weather;
