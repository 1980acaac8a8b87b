use reddit_client::{SearchRequest, SearchSort, TimeFilter};
use tracing::{info, warn};

use super::{build_query, rank_submissions, search_terms, SocialPost};
use crate::common::PipelineResult;
use crate::kernel::ServerDeps;

/// Posts requested per search before filtering.
pub const SEARCH_LIMIT: u32 = 20;

/// Search, rank and persist social posts for a disaster at a location.
///
/// A failed search degrades to an empty list; a failed insert is an error.
pub async fn fetch_social_posts(
    disaster_type: &str,
    location: &str,
    deps: &ServerDeps,
) -> PipelineResult<Vec<SocialPost>> {
    let terms = search_terms(disaster_type);
    let request = SearchRequest::new(terms.communities, build_query(&terms.keywords, location))
        .sort(SearchSort::New)
        .time_filter(TimeFilter::Week)
        .limit(SEARCH_LIMIT);

    let submissions = match deps.social.search(&request).await {
        Ok(submissions) => submissions,
        Err(e) => {
            warn!(disaster_type, location, error = %e, "Social search failed, continuing without posts");
            return Ok(Vec::new());
        }
    };

    let fetched = submissions.len();
    let posts: Vec<SocialPost> = rank_submissions(submissions, &terms.keywords, location)
        .into_iter()
        .map(|ranked| SocialPost::from_ranked(ranked, disaster_type, location))
        .collect();

    let inserted = deps.store.insert_social_posts(&posts).await?;
    info!(
        disaster_type,
        location,
        fetched,
        kept = posts.len(),
        inserted,
        "Social posts ranked"
    );

    Ok(posts)
}
