//! Backtest stage
//!
//! Scores every predictor against the trailing holdout slice of the dataset.
//! The slice is taken in provider order; nothing is re-sorted here.

use super::RosterEntry;
use crate::types::{Dataset, MatchLike};
use rand::RngCore;
use serde::Serialize;

/// Backtest result for one predictor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmScore {
    pub name: String,
    /// correct / scored, 0 when nothing was scored
    pub accuracy: f64,
    pub correct: usize,
    pub scored: usize,
    /// Predictions that returned an error; scored as misses
    pub failures: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationReport {
    /// One score per predictor, roster order
    pub scores: Vec<AlgorithmScore>,
    /// floor(fraction * dataset length)
    pub holdout_size: usize,
    /// Holdout records failing the integrity check
    pub skipped_records: usize,
    /// Nothing left to score; every accuracy is 0
    pub empty_holdout: bool,
}

impl EvaluationReport {
    pub fn accuracy_of(&self, name: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.name == name).map(|s| s.accuracy)
    }
}

/// Backtest the roster and store each predictor's accuracy on its entry
pub fn evaluate_all(
    roster: &mut [RosterEntry],
    dataset: &Dataset,
    holdout_fraction: f64,
    rng: &mut dyn RngCore,
) -> EvaluationReport {
    tracing::info!("Evaluating models (Backtesting)...");
    let holdout = dataset.holdout(holdout_fraction);
    let (scored_records, skipped_records) = Dataset::new(holdout.to_vec()).partition_valid();

    let empty_holdout = scored_records.is_empty();
    if empty_holdout {
        tracing::warn!(
            "Empty holdout ({} records, {} skipped); all accuracies set to 0",
            holdout.len(),
            skipped_records
        );
    }

    let mut scores = Vec::with_capacity(roster.len());
    for entry in roster.iter_mut() {
        let mut correct = 0;
        let mut failures = 0;
        for record in &scored_records {
            match entry.predictor.predict(record as &dyn MatchLike, &mut *rng) {
                Ok(pred) if pred.prediction == record.result => correct += 1,
                Ok(_) => {}
                Err(e) => {
                    failures += 1;
                    tracing::warn!("{} failed on holdout record: {}", entry.name(), e);
                }
            }
        }

        let scored = scored_records.len();
        let accuracy = if scored > 0 {
            correct as f64 / scored as f64
        } else {
            0.0
        };
        entry.accuracy = accuracy;
        tracing::debug!("{}: {:.1}%", entry.name(), accuracy * 100.0);

        scores.push(AlgorithmScore {
            name: entry.name().to_string(),
            accuracy,
            correct,
            scored,
            failures,
        });
    }

    EvaluationReport {
        scores,
        holdout_size: holdout.len(),
        skipped_records,
        empty_holdout,
    }
}
