//! Relevance heuristic for social submissions.
//!
//! A submission is eligible when its title has at least [`MIN_TITLE_CHARS`]
//! characters and, for self posts, its body has at least [`MIN_SELF_TEXT_CHARS`].
//! Its score is the number of keywords found in the title or text, plus
//! [`LOCATION_BONUS`] when the location is mentioned. Scores below
//! [`MIN_RELEVANCE`] are dropped and at most [`MAX_RESULTS`] are kept.

use reddit_client::Submission;

pub const MIN_TITLE_CHARS: usize = 10;
pub const MIN_SELF_TEXT_CHARS: usize = 20;
pub const MIN_RELEVANCE: u32 = 2;
pub const LOCATION_BONUS: u32 = 2;
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone)]
pub struct RankedSubmission {
    pub submission: Submission,
    pub relevance: u32,
}

/// Text the heuristic looks at besides the title: body for self posts,
/// the linked URL otherwise.
pub fn searchable_text(submission: &Submission) -> &str {
    if submission.is_self {
        &submission.selftext
    } else {
        &submission.url
    }
}

pub fn is_eligible(submission: &Submission) -> bool {
    if submission.title.chars().count() < MIN_TITLE_CHARS {
        return false;
    }
    !(submission.is_self && submission.selftext.chars().count() < MIN_SELF_TEXT_CHARS)
}

pub fn relevance(submission: &Submission, keywords: &[String], location: &str) -> u32 {
    let title = submission.title.to_lowercase();
    let text = searchable_text(submission).to_lowercase();

    let keyword_hits = keywords
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| title.contains(k.as_str()) || text.contains(k.as_str()))
        .count() as u32;

    // An empty location earns no bonus; requests are rejected before this when location is blank
    let location = location.to_lowercase();
    let location_hit = !location.is_empty() && (title.contains(&location) || text.contains(&location));

    keyword_hits + if location_hit { LOCATION_BONUS } else { 0 }
}

/// Filter, score, stable-sort by descending score and truncate.
pub fn rank_submissions(
    submissions: Vec<Submission>,
    keywords: &[String],
    location: &str,
) -> Vec<RankedSubmission> {
    let mut ranked: Vec<RankedSubmission> = submissions
        .into_iter()
        .filter(is_eligible)
        .map(|submission| {
            let relevance = relevance(&submission, keywords, location);
            RankedSubmission {
                submission,
                relevance,
            }
        })
        .filter(|r| r.relevance >= MIN_RELEVANCE)
        .collect();

    // sort_by is stable: ties keep upstream (newest-first) order
    ranked.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    ranked.truncate(MAX_RESULTS);
    ranked
}
