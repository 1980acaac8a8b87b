use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::PipelineError;

/// The five disaster kinds with curated lookup tables and demo fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Flood,
    Earthquake,
    Cyclone,
    Wildfire,
    Landslide,
}

impl DisasterType {
    pub const ALL: [DisasterType; 5] = [
        DisasterType::Flood,
        DisasterType::Earthquake,
        DisasterType::Cyclone,
        DisasterType::Wildfire,
        DisasterType::Landslide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Flood => "flood",
            DisasterType::Earthquake => "earthquake",
            DisasterType::Cyclone => "cyclone",
            DisasterType::Wildfire => "wildfire",
            DisasterType::Landslide => "landslide",
        }
    }

    /// "flood, earthquake, cyclone, wildfire, landslide"
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DisasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisasterType {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flood" => Ok(DisasterType::Flood),
            "earthquake" => Ok(DisasterType::Earthquake),
            "cyclone" => Ok(DisasterType::Cyclone),
            "wildfire" => Ok(DisasterType::Wildfire),
            "landslide" => Ok(DisasterType::Landslide),
            _ => Err(PipelineError::Validation(format!(
                "Invalid disaster type: {}. Supported types: {}",
                s,
                Self::supported_list()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Flood".parse::<DisasterType>().unwrap(), DisasterType::Flood);
        assert_eq!(" cyclone ".parse::<DisasterType>().unwrap(), DisasterType::Cyclone);
    }

    #[test]
    fn test_unknown_type_message() {
        let err = "tsunami".parse::<DisasterType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: Invalid disaster type: tsunami. Supported types: flood, earthquake, cyclone, wildfire, landslide"
        );
    }
}
