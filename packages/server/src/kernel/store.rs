//! Postgres-backed [`BaseStore`]. SQL lives on the models; this only delegates.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{BaseStore, PoolStats, StoreHealth};
use crate::common::PipelineResult;
use crate::domains::alerts::models::{Alert, Region};
use crate::domains::extraction::models::FormattedSample;
use crate::domains::reports::models::DisasterReport;
use crate::domains::scraping::models::ScrapedPage;
use crate::domains::social::models::SocialPost;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn pool_stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }
}

#[async_trait]
impl BaseStore for PostgresStore {
    async fn insert_scraped_page(&self, page: &ScrapedPage) -> PipelineResult<()> {
        page.insert(&self.pool).await
    }

    async fn insert_social_posts(&self, posts: &[SocialPost]) -> PipelineResult<u64> {
        SocialPost::insert_many(posts, &self.pool).await
    }

    async fn insert_formatted_samples(&self, samples: &[FormattedSample]) -> PipelineResult<()> {
        FormattedSample::insert_many(samples, &self.pool).await
    }

    async fn find_formatted_samples(
        &self,
        disaster_type: &str,
        location: &str,
    ) -> PipelineResult<Vec<FormattedSample>> {
        FormattedSample::find_by_disaster(disaster_type, location, &self.pool).await
    }

    async fn insert_report(&self, report: &DisasterReport) -> PipelineResult<()> {
        report.insert(&self.pool).await
    }

    async fn insert_alert_if_new(&self, alert: &Alert) -> PipelineResult<bool> {
        alert.insert_if_new(&self.pool).await
    }

    async fn insert_region_if_new(&self, region: &Region) -> PipelineResult<bool> {
        region.insert_if_new(&self.pool).await
    }

    async fn health(&self) -> StoreHealth {
        let check = tokio::time::timeout(
            HEALTH_TIMEOUT,
            sqlx::query("SELECT 1").execute(&self.pool),
        )
        .await;

        let error = match check {
            Ok(Ok(_)) => None,
            Ok(Err(e)) => Some(format!("Database query failed: {}", e)),
            Err(_) => Some(format!(
                "Database query timed out after {}s",
                HEALTH_TIMEOUT.as_secs()
            )),
        };

        StoreHealth {
            healthy: error.is_none(),
            error,
            pool: Some(self.pool_stats()),
        }
    }
}
