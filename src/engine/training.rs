//! Training stage

use super::RosterEntry;
use crate::types::Dataset;
use serde::Serialize;

/// Outcome of one training pass over the roster
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingReport {
    /// Predictors whose `train` succeeded
    pub trained: usize,
    /// `(predictor, error)` for each isolated failure
    pub failures: Vec<(String, String)>,
    /// Records dropped by the integrity check
    pub skipped_records: usize,
}

/// Train every predictor once, in registration order, on the consistent records.
///
/// A failing predictor is logged and left in whatever state its `train` left it;
/// the rest of the roster still trains.
pub fn train_all(roster: &mut [RosterEntry], dataset: &Dataset) -> TrainingReport {
    let (valid, skipped_records) = dataset.partition_valid();
    if skipped_records > 0 {
        tracing::warn!(
            "Integrity check skipped {} of {} records",
            skipped_records,
            dataset.len()
        );
    }
    tracing::info!(
        "Training {} algorithms on {} matches...",
        roster.len(),
        valid.len()
    );

    let mut report = TrainingReport {
        skipped_records,
        ..Default::default()
    };
    for entry in roster.iter_mut() {
        match entry.predictor.train(&valid) {
            Ok(()) => report.trained += 1,
            Err(e) => {
                tracing::warn!("Training failed for {}: {}", entry.name(), e);
                report.failures.push((entry.name().to_string(), e.to_string()));
            }
        }
    }
    report
}
