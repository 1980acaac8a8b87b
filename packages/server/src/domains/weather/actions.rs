use tracing::{debug, warn};

use super::WeatherSnapshot;
use crate::kernel::ServerDeps;

/// Current weather for a coordinate, or an explicit unavailable record.
///
/// Never fails: upstream errors (already retried by the adapter) are logged
/// and replaced by [`WeatherSnapshot::unavailable`].
pub async fn fetch_weather(lat: f64, lon: f64, deps: &ServerDeps) -> WeatherSnapshot {
    match deps.weather.current(lat, lon).await {
        Ok(snapshot) => {
            debug!(lat, lon, temperature = ?snapshot.temperature, "Weather fetched");
            snapshot
        }
        Err(e) => {
            warn!(lat, lon, error = %e, kind = e.kind(), "Weather unavailable");
            WeatherSnapshot::unavailable()
        }
    }
}
