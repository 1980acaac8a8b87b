pub mod social_post;

pub use social_post::SocialPost;
