//! Model-based predictors awaiting a real classifier
//!
//! Training engineers features from the historical matches so the data path
//! is exercised end to end; prediction still returns the configured
//! placeholder call, annotated with what the model was trained on.

use super::features::{FeatureRow, FeatureSummary};
use super::{ensure_consistent, Predictor};
use crate::error::Result;
use crate::types::{MatchLike, MatchRecord, Outcome, PredictionResult};
use rand::RngCore;

pub struct PlaceholderModel {
    name: String,
    outcome: Outcome,
    confidence: f64,
    details: String,
    summary: FeatureSummary,
}

impl PlaceholderModel {
    pub fn new(
        name: impl Into<String>,
        outcome: Outcome,
        confidence: f64,
        details: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            outcome,
            confidence,
            details: details.into(),
            summary: FeatureSummary::default(),
        }
    }

    pub fn summary(&self) -> &FeatureSummary {
        &self.summary
    }
}

impl Predictor for PlaceholderModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&mut self, data: &[MatchRecord]) -> Result<()> {
        ensure_consistent(data)?;
        let rows: Vec<FeatureRow> = data.iter().map(FeatureRow::from_record).collect();
        self.summary = FeatureSummary::from_rows(&rows);
        Ok(())
    }

    fn predict(&self, fixture: &dyn MatchLike, _rng: &mut dyn RngCore) -> Result<PredictionResult> {
        fixture.require_teams()?;
        let details = if self.summary.rows == 0 {
            self.details.clone()
        } else {
            format!(
                "{} ({} matches, mean xG edge {:+.2}, home win rate {:.0}%)",
                self.details,
                self.summary.rows,
                self.summary.mean_xg_diff,
                self.summary.home_win_rate * 100.0
            )
        };

        Ok(PredictionResult {
            prediction: self.outcome,
            confidence: self.confidence,
            details,
        })
    }
}
