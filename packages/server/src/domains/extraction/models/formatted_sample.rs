use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::PipelineResult;
use crate::domains::extraction::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SampleMetadata {
    /// Estimated severity, 0 to 10
    #[serde(deserialize_with = "lenient::float")]
    #[schemars(with = "f64")]
    pub severity: f64,
    #[serde(deserialize_with = "lenient::count")]
    #[schemars(with = "u64")]
    pub affected_population: u64,
    /// e.g. "Heavy rainfall, 320mm"
    #[serde(deserialize_with = "lenient::or_default")]
    pub weather_conditions: String,
    /// "negative", "neutral" or "positive"
    #[serde(deserialize_with = "lenient::or_default")]
    pub social_sentiment: String,
}

/// Text plus labels used to train the severity classifier.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FormattedSample {
    pub id: Uuid,
    pub disaster_type: String,
    pub location: String,
    pub combined_text: String,
    pub metadata: Json<SampleMetadata>,
    pub created_at: DateTime<Utc>,
}

impl FormattedSample {
    pub async fn insert_many(samples: &[Self], pool: &PgPool) -> PipelineResult<()> {
        let mut tx = pool.begin().await?;
        for sample in samples {
            sqlx::query(
                r#"
                INSERT INTO formatted_samples (id, disaster_type, location, combined_text, metadata, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(sample.id)
            .bind(&sample.disaster_type)
            .bind(&sample.location)
            .bind(&sample.combined_text)
            .bind(&sample.metadata)
            .bind(sample.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_disaster(
        disaster_type: &str,
        location: &str,
        pool: &PgPool,
    ) -> PipelineResult<Vec<Self>> {
        let samples = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM formatted_samples
            WHERE disaster_type = $1 AND location = $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(disaster_type)
        .bind(location)
        .fetch_all(pool)
        .await?;
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_nulls_default() {
        let metadata: SampleMetadata = serde_json::from_str(
            r#"{"severity": "6", "affected_population": null, "weather_conditions": null, "social_sentiment": null}"#,
        )
        .unwrap();

        assert_eq!(metadata.severity, 6.0);
        assert_eq!(metadata.affected_population, 0);
        assert_eq!(metadata.weather_conditions, "");
        assert_eq!(metadata.social_sentiment, "");
    }
}
