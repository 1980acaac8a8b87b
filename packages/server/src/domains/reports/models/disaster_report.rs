use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{PipelineResult, SeverityIndex};
use crate::domains::reports::ActionItem;

/// Terminal artifact of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DisasterReport {
    pub id: Uuid,
    pub disaster_type: String,
    pub location: String,
    pub report: String,
    pub action_plan: Json<Vec<ActionItem>>,
    pub severity_index: f64,
    pub created_at: DateTime<Utc>,
}

impl DisasterReport {
    pub fn new(
        disaster_type: impl Into<String>,
        location: impl Into<String>,
        report: String,
        action_plan: Vec<ActionItem>,
        severity: SeverityIndex,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            disaster_type: disaster_type.into(),
            location: location.into(),
            report,
            action_plan: Json(action_plan),
            severity_index: severity.value(),
            created_at: Utc::now(),
        }
    }

    pub async fn insert(&self, pool: &PgPool) -> PipelineResult<()> {
        sqlx::query(
            r#"
            INSERT INTO disaster_reports
                (id, disaster_type, location, report, action_plan, severity_index, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(self.id)
        .bind(&self.disaster_type)
        .bind(&self.location)
        .bind(&self.report)
        .bind(&self.action_plan)
        .bind(self.severity_index)
        .bind(self.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> PipelineResult<Option<Self>> {
        let report = sqlx::query_as::<_, Self>("SELECT * FROM disaster_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(report)
    }
}
