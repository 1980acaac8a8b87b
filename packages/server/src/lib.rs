// Disaster-response pipeline library
//
// Scrapes pages, weather, alert feeds and social posts, asks a language model
// for structured extraction and a response report, and persists everything.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
