use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::PipelineResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    Avalanche,
    Flood,
    Wave,
    Current,
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RegionType::Avalanche => "avalanche",
            RegionType::Flood => "flood",
            RegionType::Wave => "wave",
            RegionType::Current => "current",
        };
        f.write_str(s)
    }
}

impl FromStr for RegionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avalanche" => Ok(RegionType::Avalanche),
            "flood" => Ok(RegionType::Flood),
            "wave" | "high wave" => Ok(RegionType::Wave),
            "current" | "ocean current" => Ok(RegionType::Current),
            other => Err(format!("unknown region type: {}", other)),
        }
    }
}

/// Append-only affected zone, unique by `name`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Region {
    pub id: Uuid,
    pub name: String,
    pub region_type: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub observed_at: DateTime<Utc>,
    pub raw_data: serde_json::Value,
}

impl Region {
    pub async fn insert_if_new(&self, pool: &PgPool) -> PipelineResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO disaster_regions
                (id, name, region_type, description, latitude, longitude, observed_at, raw_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.region_type)
        .bind(&self.description)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(self.observed_at)
        .bind(&self.raw_data)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
