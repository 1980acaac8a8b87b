use tracing::info;

use super::trainer::{train_and_select, TrainingConfig};
use crate::common::{PipelineError, PipelineResult};
use crate::domains::extraction::FormattedSample;
use crate::kernel::ServerDeps;

/// Train on every stored sample for the disaster and return the
/// highest-severity validation samples.
pub async fn select_best_samples(
    disaster_type: &str,
    location: &str,
    deps: &ServerDeps,
) -> PipelineResult<Vec<FormattedSample>> {
    let samples = deps
        .store
        .find_formatted_samples(disaster_type, location)
        .await?;
    info!(disaster_type, location, samples = samples.len(), "Training severity classifier");

    let outcome = tokio::task::spawn_blocking(move || {
        train_and_select(samples, &TrainingConfig::default())
    })
    .await
    .map_err(|e| PipelineError::Internal(format!("classifier task failed: {}", e)))??;

    Ok(outcome.best_samples)
}
