use tracing::info;

use super::models::DisasterReport;
use super::{parse_action_plan, prompts, ActionItem};
use crate::common::{PipelineResult, SeverityIndex};
use crate::domains::extraction::{ExtractedData, FormattedSample};
use crate::kernel::ServerDeps;

pub async fn generate_detailed_report(
    extracted: &ExtractedData,
    best_samples: &[FormattedSample],
    deps: &ServerDeps,
) -> PipelineResult<String> {
    let prompt = prompts::report_prompt(extracted, best_samples)?;
    let report = deps.ai.complete(&prompt).await?;
    info!(disaster_type = %extracted.disaster_type, chars = report.len(), "Detailed report generated");
    Ok(report)
}

pub async fn generate_action_plan(
    report: &str,
    disaster_type: &str,
    deps: &ServerDeps,
) -> PipelineResult<Vec<ActionItem>> {
    let response = deps
        .ai
        .complete_json(&prompts::action_plan_prompt(report, disaster_type))
        .await?;
    let plan = parse_action_plan(&response)?;
    info!(disaster_type, items = plan.len(), "Action plan generated");
    Ok(plan)
}

/// Severity from the extraction when present, else the mean severity of the
/// best training samples, else 0. Always within range.
pub fn resolve_severity(extracted: &ExtractedData, best_samples: &[FormattedSample]) -> SeverityIndex {
    if let Some(value) = extracted.severity_index {
        return SeverityIndex::clamped(value);
    }
    if best_samples.is_empty() {
        return SeverityIndex::default();
    }
    let mean = best_samples
        .iter()
        .map(|s| s.metadata.severity)
        .sum::<f64>()
        / best_samples.len() as f64;
    SeverityIndex::clamped(mean)
}

/// Narrative, then action plan, then severity; persisted as one report.
pub async fn generate_report(
    extracted: &ExtractedData,
    location: &str,
    best_samples: &[FormattedSample],
    deps: &ServerDeps,
) -> PipelineResult<DisasterReport> {
    let narrative = generate_detailed_report(extracted, best_samples, deps).await?;
    let action_plan = generate_action_plan(&narrative, &extracted.disaster_type, deps).await?;
    let severity = resolve_severity(extracted, best_samples);

    let report = DisasterReport::new(
        extracted.disaster_type.clone(),
        location,
        narrative,
        action_plan,
        severity,
    );
    deps.store.insert_report(&report).await?;

    info!(report_id = %report.id, severity = %severity, "Disaster report stored");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::extraction::SampleMetadata;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn sample(severity: f64) -> FormattedSample {
        FormattedSample {
            id: Uuid::now_v7(),
            disaster_type: "flood".into(),
            location: "East District".into(),
            combined_text: "text".into(),
            metadata: Json(SampleMetadata {
                severity,
                ..Default::default()
            }),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_extraction_severity_wins_and_is_clamped() {
        let extracted = ExtractedData {
            severity_index: Some(14.0),
            ..Default::default()
        };
        assert_eq!(resolve_severity(&extracted, &[sample(2.0)]).value(), 10.0);
    }

    #[test]
    fn test_falls_back_to_sample_mean_then_zero() {
        let extracted = ExtractedData::default();
        assert_eq!(resolve_severity(&extracted, &[sample(6.0), sample(8.0)]).value(), 7.0);
        assert_eq!(resolve_severity(&extracted, &[]).value(), 0.0);
    }
}
