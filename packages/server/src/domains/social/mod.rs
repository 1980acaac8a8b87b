//! Social domain - community posts about an ongoing disaster

pub mod actions;
pub mod lookup;
pub mod models;
pub mod ranking;

pub use actions::fetch_social_posts;
pub use lookup::{build_query, search_terms, SearchTerms};
pub use models::SocialPost;
pub use ranking::{rank_submissions, RankedSubmission};
