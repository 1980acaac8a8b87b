use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherStatus {
    Live,
    Unavailable,
}

/// Current conditions at a coordinate.
///
/// Readings are `None` only when the upstream could not be reached; callers
/// see that explicitly through `status` instead of an empty record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Degrees Celsius
    pub temperature: Option<f64>,
    /// Relative humidity, percent
    pub humidity: Option<f64>,
    /// Metres per second
    pub wind_speed: Option<f64>,
    /// Millimetres over the last hour
    pub rainfall: f64,
    pub status: WeatherStatus,
}

impl WeatherSnapshot {
    pub fn live(temperature: f64, humidity: f64, wind_speed: f64, rainfall: f64) -> Self {
        Self {
            temperature: Some(temperature),
            humidity: Some(humidity),
            wind_speed: Some(wind_speed),
            rainfall,
            status: WeatherStatus::Live,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            temperature: None,
            humidity: None,
            wind_speed: None,
            rainfall: 0.0,
            status: WeatherStatus::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == WeatherStatus::Live
    }

    /// One-line description for prompts and sample metadata.
    pub fn summary(&self) -> String {
        match (self.temperature, self.humidity, self.wind_speed) {
            (Some(t), Some(h), Some(w)) if self.is_available() => format!(
                "{:.1}°C, humidity {:.0}%, wind {:.1} m/s, rainfall {:.1} mm/h",
                t, h, w, self.rainfall
            ),
            _ => "weather data unavailable".to_string(),
        }
    }
}
