use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::PipelineResult;
use crate::domains::weather::WeatherSnapshot;

/// A scraped page plus the weather at its coordinate when it was fetched.
///
/// `weather_data` holds the serialized [`WeatherSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScrapedPage {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub disaster_type: String,
    pub weather_data: String,
    pub scraped_at: DateTime<Utc>,
}

impl ScrapedPage {
    pub fn weather(&self) -> Option<WeatherSnapshot> {
        serde_json::from_str(&self.weather_data).ok()
    }

    pub async fn insert(&self, pool: &PgPool) -> PipelineResult<()> {
        sqlx::query(
            r#"
            INSERT INTO scraped_pages
                (id, url, title, description, body, published_at, location,
                 latitude, longitude, disaster_type, weather_data, scraped_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(self.id)
        .bind(&self.url)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.body)
        .bind(self.published_at)
        .bind(&self.location)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(&self.disaster_type)
        .bind(&self.weather_data)
        .bind(self.scraped_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_recent(
        disaster_type: &str,
        location: &str,
        limit: i64,
        pool: &PgPool,
    ) -> PipelineResult<Vec<Self>> {
        let pages = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM scraped_pages
            WHERE disaster_type = $1 AND location = $2
            ORDER BY scraped_at DESC
            LIMIT $3
            "#,
        )
        .bind(disaster_type)
        .bind(location)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(pages)
    }
}
