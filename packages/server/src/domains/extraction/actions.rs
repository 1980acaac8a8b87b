use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json;
use tracing::{info, warn};
use uuid::Uuid;

use super::data::{DisasterData, ExtractedData};
use super::lenient;
use super::models::{FormattedSample, SampleMetadata};
use super::prompts;
use crate::common::{parse_model_json, JsonShape, PipelineResult, SeverityIndex};
use crate::kernel::ServerDeps;

/// One element of the model's sample array.
#[derive(Debug, Deserialize)]
struct SampleDraft {
    #[serde(default, deserialize_with = "lenient::or_default")]
    combined_text: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    metadata: SampleMetadata,
}

/// Ask the model for the fixed set of response fields.
///
/// The disaster type falls back to the requested one when the model leaves it blank.
pub async fn extract_relevant_info(
    data: &DisasterData,
    deps: &ServerDeps,
) -> PipelineResult<ExtractedData> {
    info!(disaster_type = %data.disaster_type, location = %data.location, "Extracting disaster information");

    let prompt = prompts::extraction_prompt(data)?;
    let response = deps.ai.complete_json(&prompt).await?;
    let mut extracted: ExtractedData = parse_model_json(&response, JsonShape::Object)?;

    if extracted.disaster_type.trim().is_empty() {
        extracted.disaster_type = data.disaster_type.clone();
    }
    extracted.disaster_type = extracted.disaster_type.trim().to_lowercase();

    info!(
        disaster_type = %extracted.disaster_type,
        districts = extracted.affected_districts.len(),
        population = extracted.affected_population,
        "Extraction complete"
    );
    Ok(extracted)
}

/// Ask the model to turn gathered data into labelled samples and store them.
pub async fn format_training_samples(
    disaster_type: &str,
    location: &str,
    data: &DisasterData,
    deps: &ServerDeps,
) -> PipelineResult<Vec<FormattedSample>> {
    let prompt = prompts::sample_prompt(data)?;
    let response = deps.ai.complete_json(&prompt).await?;
    let drafts: Vec<SampleDraft> = parse_model_json(&response, JsonShape::Array)?;

    let now = Utc::now();
    let total = drafts.len();
    let samples: Vec<FormattedSample> = drafts
        .into_iter()
        .filter(|d| !d.combined_text.trim().is_empty())
        .map(|d| {
            let mut metadata = d.metadata;
            metadata.severity = SeverityIndex::clamped(metadata.severity).value();
            FormattedSample {
                id: Uuid::now_v7(),
                disaster_type: disaster_type.to_string(),
                location: location.to_string(),
                combined_text: d.combined_text,
                metadata: Json(metadata),
                created_at: now,
            }
        })
        .collect();

    if samples.len() < total {
        warn!(skipped = total - samples.len(), "Dropped samples without text");
    }

    deps.store.insert_formatted_samples(&samples).await?;
    info!(disaster_type, location, count = samples.len(), "Training samples stored");
    Ok(samples)
}
