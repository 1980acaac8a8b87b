use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::{PipelineError, PipelineResult};

pub const MIN_SEVERITY: f64 = 0.0;
pub const MAX_SEVERITY: f64 = 10.0;

/// Disaster severity on the closed scale 0..=10.
///
/// Construct with [`SeverityIndex::new`] for input that must already be valid,
/// or [`SeverityIndex::clamped`] for model output that may drift out of range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SeverityIndex(f64);

impl SeverityIndex {
    pub fn new(value: f64) -> PipelineResult<Self> {
        if !value.is_finite() || !(MIN_SEVERITY..=MAX_SEVERITY).contains(&value) {
            return Err(PipelineError::Validation(format!(
                "severity index {} outside {}..={}",
                value, MIN_SEVERITY, MAX_SEVERITY
            )));
        }
        Ok(Self(value))
    }

    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            warn!("Severity index is NaN, using 0");
            return Self(MIN_SEVERITY);
        }
        let clamped = value.clamp(MIN_SEVERITY, MAX_SEVERITY);
        if clamped != value {
            warn!(raw = value, clamped, "Severity index out of range, clamping");
        }
        Self(clamped)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Nearest integer class, used as the classifier label.
    pub fn class(self) -> usize {
        self.0.round() as usize
    }
}

impl TryFrom<f64> for SeverityIndex {
    type Error = PipelineError;

    fn try_from(value: f64) -> PipelineResult<Self> {
        Self::new(value)
    }
}

impl From<SeverityIndex> for f64 {
    fn from(s: SeverityIndex) -> f64 {
        s.0
    }
}

impl fmt::Display for SeverityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
