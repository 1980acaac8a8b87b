//! Reddit adapter for [`BaseSocialSearch`].

use async_trait::async_trait;
use reddit_client::{RedditClient, SearchRequest, Submission};

use super::BaseSocialSearch;
use crate::common::{PipelineError, PipelineResult, RetryPolicy};

const SERVICE: &str = "social search";

pub struct RedditSearch {
    client: RedditClient,
    retry: RetryPolicy,
}

impl RedditSearch {
    pub fn new(client: RedditClient, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }
}

#[async_trait]
impl BaseSocialSearch for RedditSearch {
    async fn search(&self, request: &SearchRequest) -> PipelineResult<Vec<Submission>> {
        self.retry
            .run(SERVICE, || async {
                self.client
                    .search(request)
                    .await
                    .map_err(PipelineError::from)
            })
            .await
    }
}
