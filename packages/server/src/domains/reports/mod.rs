//! Reports domain - narrative report, action plan and severity for a disaster

pub mod action_plan;
pub mod actions;
pub mod models;
pub mod prompts;

pub use action_plan::{parse_action_plan, ActionItem, Priority, Timeframe};
pub use actions::{generate_action_plan, generate_detailed_report, generate_report, resolve_severity};
pub use models::DisasterReport;
