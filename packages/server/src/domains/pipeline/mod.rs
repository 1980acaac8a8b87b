//! Pipeline domain - end-to-end runs that tie every other domain together

pub mod actions;
pub mod data;
pub mod fixtures;

pub use actions::{process_disaster_data, process_fixture};
pub use data::{DisasterResponse, ProcessRequest, SocialInsight};
