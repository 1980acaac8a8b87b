pub mod formatted_sample;

pub use formatted_sample::{FormattedSample, SampleMetadata};
