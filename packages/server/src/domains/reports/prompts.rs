use crate::common::{PipelineError, PipelineResult};
use crate::domains::extraction::{ExtractedData, FormattedSample};

const REPORT_PROMPT: &str = r#"You are a disaster management expert. Based on the extracted disaster data below,
write a detailed report for relief workers that includes:

1. Executive summary of the situation
2. Current status assessment
3. Critical needs and priorities
4. Plan of action:
   - Immediate response actions (0-48 hours)
   - Short-term response actions (3-7 days)
   - Medium-term recovery actions (1-4 weeks)
5. Resource allocation recommendations
6. Coordination instructions between agencies
7. Guidance for medical teams, food distribution, shelter management, and water/sanitation

Make the report practical, specific, and actionable for field workers.
"#;

const ACTION_PLAN_PROMPT: &str = r#"Extract a structured action plan from the disaster response report below as a JSON array.

Each item must be an object with exactly these fields:
{
  "priority": "high" | "medium" | "low",
  "timeframe": "immediate" | "short-term" | "medium-term",
  "action": "description of the action",
  "responsible": "agency or team responsible",
  "resources_needed": ["list", "of", "resources"],
  "success_criteria": "how to measure completion"
}

Return ONLY the JSON array with no additional text or explanation.
"#;

/// Per-type focus for the narrative report.
pub fn report_focus(disaster_type: &str) -> &'static str {
    match disaster_type {
        "flood" => "water levels, flood path predictions, and waterborne disease prevention",
        "earthquake" => "structural damage, aftershock risks, and search-and-rescue operations",
        "cyclone" => "wind damage, storm surge impacts, and evacuation coordination",
        "wildfire" => "fire containment, air quality management, and evacuation safety",
        "landslide" => "soil stability, road clearance, and secondary landslide risks",
        _ => "the most pressing hazards for this disaster type",
    }
}

/// Example actions that steer the plan towards the disaster type.
pub fn action_examples(disaster_type: &str) -> &'static str {
    match disaster_type {
        "flood" => "\"deploy water pumps\", \"distribute water purification tablets\"",
        "earthquake" => "\"conduct structural assessments\", \"set up search-and-rescue teams\"",
        "cyclone" => "\"reinforce shelters\", \"monitor storm surge levels\"",
        "wildfire" => "\"establish firebreaks\", \"distribute air masks\"",
        "landslide" => "\"clear blocked roads\", \"monitor soil stability\"",
        _ => "\"assess damage\", \"coordinate relief supplies\"",
    }
}

pub fn report_prompt(
    extracted: &ExtractedData,
    best_samples: &[FormattedSample],
) -> PipelineResult<String> {
    let data = serde_json::to_string_pretty(extracted)
        .map_err(|e| PipelineError::Validation(format!("cannot serialize extracted data: {}", e)))?;

    let mut prompt = format!(
        "{}\nThis is a {} disaster. Focus on {}.\n\n## Extracted Data\n{}\n",
        REPORT_PROMPT,
        extracted.disaster_type,
        report_focus(&extracted.disaster_type),
        data
    );

    if !best_samples.is_empty() {
        prompt.push_str("\n## Highest-Severity Field Reports\n");
        for sample in best_samples {
            prompt.push_str(&format!(
                "- (severity {:.1}) {}\n",
                sample.metadata.severity, sample.combined_text
            ));
        }
    }

    Ok(prompt)
}

pub fn action_plan_prompt(report: &str, disaster_type: &str) -> String {
    format!(
        "{}\nThe report concerns a {} disaster; prefer actions such as {}.\n\n## Report\n{}",
        ACTION_PLAN_PROMPT,
        disaster_type,
        action_examples(disaster_type),
        report
    )
}
