use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::PipelineResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Meteorological,
    Seismic,
    Flood,
    Avalanche,
    News,
    Weather,
}

impl AlertType {
    /// Map a feed's free-form type label. Anything unrecognised is news.
    pub fn from_feed_label(label: &str) -> Self {
        label.parse().unwrap_or(AlertType::News)
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertType::Meteorological => "meteorological",
            AlertType::Seismic => "seismic",
            AlertType::Flood => "flood",
            AlertType::Avalanche => "avalanche",
            AlertType::News => "news",
            AlertType::Weather => "weather",
        };
        f.write_str(s)
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "meteorological" | "imd" => Ok(AlertType::Meteorological),
            "seismic" | "earthquake" => Ok(AlertType::Seismic),
            "flood" => Ok(AlertType::Flood),
            "avalanche" => Ok(AlertType::Avalanche),
            "news" => Ok(AlertType::News),
            "weather" => Ok(AlertType::Weather),
            other => Err(format!("unknown alert type: {}", other)),
        }
    }
}

/// Append-only warning from an alert feed, unique by `source_id`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub source_id: String,
    pub alert_type: String,
    pub source: String,
    pub title: String,
    pub description: String,
    pub severity: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub issued_at: DateTime<Utc>,
    pub raw_data: serde_json::Value,
}

impl Alert {
    pub fn alert_type(&self) -> AlertType {
        AlertType::from_feed_label(&self.alert_type)
    }

    /// Insert unless the source id is already stored. Returns whether a row was written.
    pub async fn insert_if_new(&self, pool: &PgPool) -> PipelineResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO disaster_alerts
                (id, source_id, alert_type, source, title, description, severity,
                 location, latitude, longitude, issued_at, raw_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (source_id) DO NOTHING
            "#,
        )
        .bind(self.id)
        .bind(&self.source_id)
        .bind(&self.alert_type)
        .bind(&self.source)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.severity)
        .bind(&self.location)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(self.issued_at)
        .bind(&self.raw_data)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn find_recent(limit: i64, pool: &PgPool) -> PipelineResult<Vec<Self>> {
        let alerts = sqlx::query_as::<_, Self>(
            "SELECT * FROM disaster_alerts ORDER BY issued_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_labels() {
        assert_eq!(AlertType::from_feed_label("IMD"), AlertType::Meteorological);
        assert_eq!(AlertType::from_feed_label("Earthquake"), AlertType::Seismic);
        assert_eq!(AlertType::from_feed_label("FLOOD"), AlertType::Flood);
        assert_eq!(AlertType::from_feed_label("General"), AlertType::News);
        assert_eq!(AlertType::Weather.to_string(), "weather");
    }
}
