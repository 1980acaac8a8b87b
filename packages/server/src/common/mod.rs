pub mod disaster_type;
pub mod errors;
pub mod json_extract;
pub mod retry;
pub mod severity;

pub use disaster_type::DisasterType;
pub use errors::{PipelineError, PipelineResult};
pub use json_extract::{parse_model_json, JsonShape};
pub use retry::RetryPolicy;
pub use severity::SeverityIndex;
