use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::PipelineResult;
use crate::domains::social::RankedSubmission;

/// A ranked community post, keyed by its upstream id.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SocialPost {
    pub post_id: String,
    pub title: String,
    pub text: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub permalink: String,
    pub community: String,
    pub upvotes: i64,
    pub relevance: i32,
    pub disaster_type: String,
    pub location: String,
    pub fetched_at: DateTime<Utc>,
}

impl SocialPost {
    pub fn from_ranked(ranked: RankedSubmission, disaster_type: &str, location: &str) -> Self {
        let s = ranked.submission;
        Self {
            created_at: s.created_at(),
            permalink: s.permalink_url(),
            post_id: s.id,
            title: s.title,
            text: if s.is_self { s.selftext } else { s.url.clone() },
            author: s.author,
            url: s.url,
            community: s.subreddit,
            upvotes: s.score,
            relevance: ranked.relevance as i32,
            disaster_type: disaster_type.to_string(),
            location: location.to_string(),
            fetched_at: Utc::now(),
        }
    }

    /// Insert a batch, skipping post ids already stored. Returns rows inserted.
    pub async fn insert_many(posts: &[Self], pool: &PgPool) -> PipelineResult<u64> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;
        for post in posts {
            let result = sqlx::query(
                r#"
                INSERT INTO social_posts
                    (post_id, title, text, author, created_at, url, permalink, community,
                     upvotes, relevance, disaster_type, location, fetched_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                ON CONFLICT (post_id) DO NOTHING
                "#,
            )
            .bind(&post.post_id)
            .bind(&post.title)
            .bind(&post.text)
            .bind(&post.author)
            .bind(post.created_at)
            .bind(&post.url)
            .bind(&post.permalink)
            .bind(&post.community)
            .bind(post.upvotes)
            .bind(post.relevance)
            .bind(&post.disaster_type)
            .bind(&post.location)
            .bind(post.fetched_at)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn find_by_disaster(
        disaster_type: &str,
        location: &str,
        pool: &PgPool,
    ) -> PipelineResult<Vec<Self>> {
        let posts = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM social_posts
            WHERE disaster_type = $1 AND location = $2
            ORDER BY relevance DESC, created_at DESC
            "#,
        )
        .bind(disaster_type)
        .bind(location)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }
}
