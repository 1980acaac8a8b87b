//! OpenWeatherMap current-conditions client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::BaseWeatherService;
use crate::common::errors::{from_reqwest, from_status};
use crate::common::{PipelineError, PipelineResult, RetryPolicy};
use crate::domains::weather::WeatherSnapshot;

const SERVICE: &str = "weather";
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    #[serde(default)]
    wind: Option<Wind>,
    #[serde(default)]
    rain: Option<Rain>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Rain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

impl From<CurrentWeather> for WeatherSnapshot {
    fn from(w: CurrentWeather) -> Self {
        WeatherSnapshot::live(
            w.main.temp,
            w.main.humidity,
            w.wind.map(|w| w.speed).unwrap_or(0.0),
            w.rain.map(|r| r.one_hour).unwrap_or(0.0),
        )
    }
}

pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>, retry: RetryPolicy) -> PipelineResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| from_reqwest(SERVICE, e))?;
        Ok(Self {
            http,
            api_key,
            base_url: OPENWEATHER_BASE_URL.to_string(),
            retry,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch(&self, api_key: &str, lat: f64, lon: f64) -> PipelineResult<WeatherSnapshot> {
        let response = self
            .http
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(from_status(SERVICE, status));
        }

        let body: CurrentWeather = response
            .json()
            .await
            .map_err(|e| PipelineError::malformed(SERVICE, e.without_url().to_string()))?;
        Ok(body.into())
    }
}

#[async_trait]
impl BaseWeatherService for OpenWeatherClient {
    async fn current(&self, lat: f64, lon: f64) -> PipelineResult<WeatherSnapshot> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(PipelineError::rejected(
                SERVICE,
                None,
                "OPENWEATHER_API_KEY is not configured",
            ));
        };
        self.retry
            .run(SERVICE, || self.fetch(api_key, lat, lon))
            .await
    }
}
