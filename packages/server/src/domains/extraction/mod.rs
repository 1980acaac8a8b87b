//! Extraction domain - structured facts and training samples from raw inputs

pub mod actions;
pub mod data;
pub mod lenient;
pub mod models;
pub mod prompts;

pub use actions::{extract_relevant_info, format_training_samples};
pub use data::{ActiveIncident, DisasterData, EvacuationCenter, ExtractedData, ReliefOperation};
pub use models::{FormattedSample, SampleMetadata};
