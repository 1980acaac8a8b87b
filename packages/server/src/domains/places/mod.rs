//! Places domain - nearby hospitals, shelters and other facilities

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::common::{PipelineError, PipelineResult};
use crate::kernel::ServerDeps;

pub const DEFAULT_RADIUS_METERS: f64 = 1000.0;
pub const MAX_RADIUS_METERS: f64 = 50_000.0;
pub const DEFAULT_PLACE_TYPE: &str = "hospital";

/// Query parameters for a nearby-places lookup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_place_type")]
    pub place_type: String,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}

fn default_place_type() -> String {
    DEFAULT_PLACE_TYPE.to_string()
}

impl NearbyQuery {
    pub fn validate(&self) -> PipelineResult<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(PipelineError::Validation(format!(
                "latitude {} outside -90..90",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(PipelineError::Validation(format!(
                "longitude {} outside -180..180",
                self.lon
            )));
        }
        if !(self.radius > 0.0 && self.radius <= MAX_RADIUS_METERS) {
            return Err(PipelineError::Validation(format!(
                "radius must be in (0, {}] metres",
                MAX_RADIUS_METERS
            )));
        }
        if self.place_type.trim().is_empty() {
            return Err(PipelineError::Validation("place_type must not be empty".into()));
        }
        Ok(())
    }
}

pub async fn find_nearby_places(query: &NearbyQuery, deps: &ServerDeps) -> PipelineResult<Value> {
    query.validate()?;
    info!(lat = query.lat, lon = query.lon, radius = query.radius, place_type = %query.place_type, "Looking up nearby places");
    deps.places.search_nearby(query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: f64, lon: f64, radius: f64) -> NearbyQuery {
        NearbyQuery {
            lat,
            lon,
            radius,
            place_type: "hospital".into(),
        }
    }

    #[test]
    fn test_validation_bounds() {
        assert!(query(25.4, 85.1, 1000.0).validate().is_ok());
        assert!(query(90.0, -180.0, MAX_RADIUS_METERS).validate().is_ok());
        assert!(query(91.0, 0.0, 1000.0).validate().is_err());
        assert!(query(0.0, 181.0, 1000.0).validate().is_err());
        assert!(query(0.0, 0.0, 0.0).validate().is_err());
        assert!(query(0.0, 0.0, MAX_RADIUS_METERS + 1.0).validate().is_err());
        assert!(query(0.0, 0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_defaults_from_query_string() {
        let q: NearbyQuery = serde_json::from_str(r#"{"lat": 1.0, "lon": 2.0}"#).unwrap();
        assert_eq!(q.radius, DEFAULT_RADIUS_METERS);
        assert_eq!(q.place_type, "hospital");
    }
}
