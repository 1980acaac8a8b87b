//! Classifier domain - severity model trained on stored samples
//!
//! A small multinomial logistic regression over hashed bag-of-words
//! features. It only has to rank a handful of validation samples, so it
//! trains in milliseconds on a blocking thread.

pub mod actions;
pub mod model;
pub mod trainer;

pub use actions::select_best_samples;
pub use model::SeverityClassifier;
pub use trainer::{train_and_select, TrainingConfig, TrainingOutcome};
