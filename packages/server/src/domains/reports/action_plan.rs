use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::common::{parse_model_json, JsonShape, PipelineResult};
use crate::domains::extraction::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    MediumTerm,
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();
        match normalized.as_str() {
            "immediate" => Ok(Timeframe::Immediate),
            "short-term" => Ok(Timeframe::ShortTerm),
            "medium-term" => Ok(Timeframe::MediumTerm),
            other => Err(format!("unknown timeframe: {}", other)),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Timeframe::Immediate => "immediate",
            Timeframe::ShortTerm => "short-term",
            Timeframe::MediumTerm => "medium-term",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub timeframe: Timeframe,
    #[serde(deserialize_with = "lenient::or_default")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub responsible: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub resources_needed: Vec<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub success_criteria: String,
}

/// Parse a model-produced action plan.
///
/// The response must contain a JSON array. Items with an unknown priority or
/// timeframe, or no action text, are dropped; the rest keep their order.
pub fn parse_action_plan(response: &str) -> PipelineResult<Vec<ActionItem>> {
    let items: Vec<Value> = parse_model_json(response, JsonShape::Array)?;

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<ActionItem>(item) {
            Ok(action) if !action.action.trim().is_empty() => Some(action),
            Ok(_) => {
                warn!(index, "Dropping action item without action text");
                None
            }
            Err(e) => {
                warn!(index, error = %e, "Dropping invalid action item");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PipelineError;

    #[test]
    fn test_invalid_items_are_dropped() {
        let response = r#"```json
[
  {"priority": "High", "timeframe": "immediate", "action": "Deploy water pumps",
   "responsible": "Fire services", "resources_needed": ["pumps"], "success_criteria": "Water receding"},
  {"priority": "urgent", "timeframe": "immediate", "action": "Evacuate"},
  {"priority": "low", "timeframe": "medium_term", "action": "Rebuild embankments"},
  {"priority": "medium", "timeframe": "next year", "action": "Plan"}
]
```"#;
        let plan = parse_action_plan(response).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].priority, Priority::High);
        assert_eq!(plan[0].resources_needed, vec!["pumps"]);
        assert_eq!(plan[1].timeframe, Timeframe::MediumTerm);
        assert!(plan[1].resources_needed.is_empty());
    }

    #[test]
    fn test_null_optional_fields_keep_item() {
        let response = r#"[
  {"priority": "high", "timeframe": "immediate", "action": "Evacuate ward 3",
   "responsible": null, "resources_needed": null, "success_criteria": "done"},
  {"priority": "low", "timeframe": "short-term", "action": null}
]"#;
        let plan = parse_action_plan(response).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].action, "Evacuate ward 3");
        assert_eq!(plan[0].responsible, "");
        assert!(plan[0].resources_needed.is_empty());
        assert_eq!(plan[0].success_criteria, "done");
    }

    #[test]
    fn test_timeframe_serializes_kebab_case() {
        let json = serde_json::to_value(Timeframe::ShortTerm).unwrap();
        assert_eq!(json, "short-term");
        assert_eq!(serde_json::to_value(Priority::Medium).unwrap(), "medium");
    }

    #[test]
    fn test_no_array_is_extraction_error() {
        assert!(matches!(
            parse_action_plan("I could not produce a plan."),
            Err(PipelineError::DataExtraction(_))
        ));
    }
}
