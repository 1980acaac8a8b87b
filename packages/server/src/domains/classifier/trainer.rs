use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use super::model::{featurize, SeverityClassifier};
use crate::common::{PipelineError, PipelineResult, SeverityIndex};
use crate::domains::extraction::FormattedSample;

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub weight_decay: f64,
    pub validation_fraction: f64,
    pub seed: u64,
    pub top_k: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 3,
            learning_rate: 0.1,
            weight_decay: 0.01,
            validation_fraction: 0.2,
            seed: 42,
            top_k: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Validation samples with the highest predicted severity, best first
    pub best_samples: Vec<FormattedSample>,
    pub train_size: usize,
    pub validation_size: usize,
    pub validation_accuracy: f64,
}

/// Validation set size: ceil(fraction * n), at least 1, leaving at least 1 to train on.
pub fn validation_size(total: usize, fraction: f64) -> usize {
    let n = (total as f64 * fraction).ceil() as usize;
    n.clamp(1, total.saturating_sub(1).max(1))
}

fn label(sample: &FormattedSample) -> usize {
    SeverityIndex::clamped(sample.metadata.severity).class()
}

/// Train on a seeded 80/20 split and rank the validation samples.
///
/// Deterministic for a given sample order and config.
pub fn train_and_select(
    samples: Vec<FormattedSample>,
    config: &TrainingConfig,
) -> PipelineResult<TrainingOutcome> {
    if samples.len() < 2 {
        return Err(PipelineError::InsufficientData(format!(
            "need at least 2 samples to train, found {}",
            samples.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.shuffle(&mut rng);

    let validation_n = validation_size(samples.len(), config.validation_fraction);
    let (validation_idx, train_idx) = order.split_at(validation_n);

    let features: Vec<Vec<(usize, f64)>> = samples
        .iter()
        .map(|s| featurize(&s.combined_text))
        .collect();

    let mut model = SeverityClassifier::new();
    let mut epoch_order = train_idx.to_vec();
    for epoch in 0..config.epochs {
        epoch_order.shuffle(&mut rng);
        for &i in &epoch_order {
            model.update(
                &features[i],
                label(&samples[i]),
                config.learning_rate,
                config.weight_decay,
            );
        }
        debug!(epoch = epoch + 1, "Classifier epoch complete");
    }

    let mut scored: Vec<(usize, usize)> = validation_idx
        .iter()
        .map(|&i| (i, model.predict(&features[i])))
        .collect();

    let correct = scored
        .iter()
        .filter(|(i, predicted)| *predicted == label(&samples[*i]))
        .count();
    let validation_accuracy = correct as f64 / scored.len() as f64;

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    let best_samples: Vec<FormattedSample> = scored
        .iter()
        .take(config.top_k)
        .map(|(i, _)| samples[*i].clone())
        .collect();

    info!(
        train = train_idx.len(),
        validation = validation_n,
        accuracy = validation_accuracy,
        selected = best_samples.len(),
        "Severity classifier trained"
    );

    Ok(TrainingOutcome {
        best_samples,
        train_size: train_idx.len(),
        validation_size: validation_n,
        validation_accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::extraction::SampleMetadata;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn sample(text: &str, severity: f64) -> FormattedSample {
        FormattedSample {
            id: Uuid::new_v4(),
            disaster_type: "flood".into(),
            location: "East District".into(),
            combined_text: text.into(),
            metadata: Json(SampleMetadata {
                severity,
                ..Default::default()
            }),
            created_at: Utc::now(),
        }
    }

    fn corpus(n: usize) -> Vec<FormattedSample> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    sample(&format!("embankment breached villages submerged {}", i), 9.0)
                } else {
                    sample(&format!("light showers rivers normal {}", i), 2.0)
                }
            })
            .collect()
    }

    #[test]
    fn test_validation_split_sizes() {
        assert_eq!(validation_size(10, 0.2), 2);
        assert_eq!(validation_size(11, 0.2), 3);
        assert_eq!(validation_size(2, 0.2), 1);
        assert_eq!(validation_size(3, 0.2), 1);
    }

    #[test]
    fn test_too_few_samples() {
        let err = train_and_select(vec![sample("one", 3.0)], &TrainingConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData(_)));
    }

    #[test]
    fn test_selects_top_two_from_validation() {
        let outcome = train_and_select(corpus(20), &TrainingConfig::default()).unwrap();

        assert_eq!(outcome.validation_size, 4);
        assert_eq!(outcome.train_size, 16);
        assert_eq!(outcome.best_samples.len(), 2);
        assert!((0.0..=1.0).contains(&outcome.validation_accuracy));
    }

    #[test]
    fn test_training_is_deterministic() {
        let samples = corpus(15);
        let first = train_and_select(samples.clone(), &TrainingConfig::default()).unwrap();
        let second = train_and_select(samples, &TrainingConfig::default()).unwrap();

        let ids = |o: &TrainingOutcome| o.best_samples.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_two_samples_yield_one_selection() {
        let outcome = train_and_select(corpus(2), &TrainingConfig::default()).unwrap();
        assert_eq!(outcome.best_samples.len(), 1);
    }
}
