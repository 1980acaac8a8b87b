use gemini_client::StructuredOutput;

use super::data::{DisasterData, ExtractedData};
use super::models::SampleMetadata;
use crate::common::{PipelineError, PipelineResult};

const EXTRACTION_PROMPT: &str = r#"You are a disaster response information extraction system.

Given the disaster-related data below, extract only the information relevant to emergency response.
First identify the primary disaster type (flood, earthquake, cyclone, wildfire, landslide), then extract:

- Affected districts or regions
- Affected population estimate
- Evacuation centers
- Disaster-specific data:
  - Floods: rainfall levels, dam and river water levels, live precipitation
  - Earthquakes: magnitude, depth, epicenter, aftershock predictions
  - Cyclones: wind speeds, atmospheric pressure, storm surge
  - Wildfires: area burned, containment percentage, air quality index
  - Landslides: soil stability, slope analysis, recent rainfall
- Most affected areas
- Current relief operations
- Active incidents
- An overall severity index from 0 (no impact) to 10 (catastrophic)

## Rules
- Use only facts present in the data; leave a field empty rather than inventing values
- Return ONLY a JSON object matching the schema, with no explanation outside it
"#;

const SAMPLE_PROMPT: &str = r#"You are a disaster data processing agent.

Combine the scraped disaster data and social posts below into training samples for a classifier
that predicts disaster severity. Each sample has:

- "combined_text": one concise passage (at most ~512 tokens) merging the relevant text
- "metadata":
  - "severity": estimated severity on a 0-10 scale
  - "affected_population": estimated number of people affected
  - "weather_conditions": short weather summary, e.g. "Heavy rainfall, 320mm"
  - "social_sentiment": "negative", "neutral" or "positive"

Return ONLY a JSON array of samples with no additional text.
"#;

fn data_json(data: &DisasterData) -> PipelineResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| PipelineError::Validation(format!("cannot serialize disaster data: {}", e)))
}

pub fn extraction_prompt(data: &DisasterData) -> PipelineResult<String> {
    Ok(format!(
        "{}\n## JSON Schema\n{}\n\n## Data\n{}",
        EXTRACTION_PROMPT,
        ExtractedData::prompt_schema_pretty(),
        data_json(data)?
    ))
}

pub fn sample_prompt(data: &DisasterData) -> PipelineResult<String> {
    Ok(format!(
        "{}\n## Metadata Schema\n{}\n\n## Data\n{}",
        SAMPLE_PROMPT,
        SampleMetadata::prompt_schema_pretty(),
        data_json(data)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_embeds_schema_and_data() {
        let data = DisasterData::new("flood", "East District");
        let prompt = extraction_prompt(&data).unwrap();

        assert!(prompt.contains("\"affected_population\""));
        assert!(prompt.contains("\"severity_index\""));
        assert!(prompt.contains("East District"));
        assert!(!prompt.contains("definitions"));
    }
}
