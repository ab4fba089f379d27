//! Algorithm evaluation and selection engine
//!
//! ```text
//! Dataset → Training → Backtest → Selector → Consensus (per match query)
//! ```
//!
//! [`Engine`] owns the roster, the current dataset and the selection state.
//! It is plain mutable state; [`EngineHandle`] wraps it in a readers-writer
//! lock for the serving layer.

mod consensus;
mod evaluation;
mod handle;
mod selector;
mod training;

pub use consensus::{compose, ConsensusResult, GoldenBlock, SecondaryBlock};
pub use evaluation::{evaluate_all, AlgorithmScore, EvaluationReport};
pub use handle::{DashboardView, EngineHandle, EngineStatus};
pub use selector::{select_golden, Selection};
pub use training::{train_all, TrainingReport};

use crate::config::{EngineConfig, ModelConfig};
use crate::error::{OracleError, Result};
use crate::model::{default_roster, Predictor};
use crate::types::{Dataset, MatchLike};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::Serialize;

/// A registered predictor and its latest backtest accuracy
pub struct RosterEntry {
    pub(crate) predictor: Box<dyn Predictor>,
    pub(crate) accuracy: f64,
}

impl RosterEntry {
    pub fn new(predictor: Box<dyn Predictor>) -> Self {
        Self {
            predictor,
            accuracy: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        self.predictor.name()
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub golden_algorithm: String,
    pub system_accuracy: f64,
    pub algorithms_tested: usize,
    pub data_points: usize,
    pub skipped_records: usize,
    pub empty_holdout: bool,
    pub evaluated_at: DateTime<Utc>,
}

/// One line of the accuracy leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub rank: usize,
    pub name: String,
    pub accuracy: f64,
    pub golden: bool,
}

pub struct Engine {
    roster: Vec<RosterEntry>,
    dataset: Dataset,
    holdout_fraction: f64,
    selection: Selection,
    last_training: Option<TrainingReport>,
    last_evaluation: Option<EvaluationReport>,
    evaluated_at: Option<DateTime<Utc>>,
}

impl Engine {
    pub fn new(predictors: Vec<Box<dyn Predictor>>, config: &EngineConfig) -> Self {
        Self {
            roster: predictors.into_iter().map(RosterEntry::new).collect(),
            dataset: Dataset::default(),
            holdout_fraction: config.holdout_fraction,
            selection: Selection::Uninitialized,
            last_training: None,
            last_evaluation: None,
            evaluated_at: None,
        }
    }

    pub fn with_default_roster(model: &ModelConfig, config: &EngineConfig) -> Self {
        Self::new(default_roster(model), config)
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_initialized(&self) -> bool {
        self.selection != Selection::Uninitialized
    }

    pub fn last_training(&self) -> Option<&TrainingReport> {
        self.last_training.as_ref()
    }

    pub fn last_evaluation(&self) -> Option<&EvaluationReport> {
        self.last_evaluation.as_ref()
    }

    /// Train the whole roster on `dataset`, which replaces the previous one
    pub fn train(&mut self, dataset: Dataset) -> &TrainingReport {
        self.dataset = dataset;
        let report = train_all(&mut self.roster, &self.dataset);
        self.last_training.insert(report)
    }

    /// Backtest the current dataset and re-select the golden predictor
    pub fn evaluate(&mut self, rng: &mut dyn RngCore) -> &EvaluationReport {
        let report = evaluate_all(&mut self.roster, &self.dataset, self.holdout_fraction, rng);
        self.select();
        self.evaluated_at = Some(Utc::now());
        self.last_evaluation.insert(report)
    }

    /// Full train + evaluate + select cycle on a fresh dataset
    pub fn run_cycle(&mut self, dataset: Dataset, rng: &mut dyn RngCore) -> &EvaluationReport {
        self.train(dataset);
        self.evaluate(rng)
    }

    fn select(&mut self) {
        match select_golden(&self.roster) {
            Some(index) => {
                self.selection = Selection::Selected { index };
                let golden = &self.roster[index];
                tracing::info!(
                    "Golden Algorithm Selected: {} with {:.1}% Accuracy",
                    golden.name(),
                    golden.accuracy * 100.0
                );
            }
            None => tracing::warn!("Empty roster, no golden algorithm to select"),
        }
    }

    pub fn golden(&self) -> Result<&RosterEntry> {
        self.selection
            .index()
            .map(|index| &self.roster[index])
            .ok_or(OracleError::NotInitialized)
    }

    pub fn golden_accuracy(&self) -> Result<f64> {
        self.golden().map(RosterEntry::accuracy)
    }

    /// Golden prediction plus every other predictor's call for one match
    pub fn analyze(&self, fixture: &dyn MatchLike, rng: &mut dyn RngCore) -> Result<ConsensusResult> {
        let golden = self.selection.index().ok_or(OracleError::NotInitialized)?;
        compose(&self.roster, golden, fixture, rng)
    }

    pub fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let golden = self.golden()?;
        let evaluation = self.last_evaluation.as_ref();
        Ok(DashboardSummary {
            golden_algorithm: golden.name().to_string(),
            system_accuracy: golden.accuracy,
            algorithms_tested: self.roster.len(),
            data_points: self.dataset.len(),
            skipped_records: self
                .last_training
                .as_ref()
                .map_or(0, |t| t.skipped_records),
            empty_holdout: evaluation.is_some_and(|e| e.empty_holdout),
            evaluated_at: self.evaluated_at.unwrap_or_else(Utc::now),
        })
    }

    /// Roster by descending accuracy; equal accuracies keep roster order
    pub fn rankings(&self) -> Vec<Ranking> {
        let golden = self.selection.index();
        let mut order: Vec<usize> = (0..self.roster.len()).collect();
        order.sort_by(|a, b| self.roster[*b].accuracy.total_cmp(&self.roster[*a].accuracy));
        order
            .into_iter()
            .enumerate()
            .map(|(rank, index)| Ranking {
                rank: rank + 1,
                name: self.roster[index].name().to_string(),
                accuracy: self.roster[index].accuracy,
                golden: Some(index) == golden,
            })
            .collect()
    }
}
