//! Consensus composition for live matches

use super::RosterEntry;
use crate::error::Result;
use crate::types::{MatchLike, Outcome, PredictionResult};
use rand::RngCore;
use serde::Serialize;

/// The golden predictor's authoritative call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldenBlock {
    pub name: String,
    pub accuracy: f64,
    pub prediction: PredictionResult,
}

/// Another predictor's call, shown for comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryBlock {
    pub algorithm: String,
    /// `None` when this predictor failed on the match
    pub prediction: Option<Outcome>,
    pub confidence: Option<f64>,
    /// Rationale, or the failure message
    pub details: String,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusResult {
    pub golden_algorithm: GoldenBlock,
    /// Every other predictor, roster order
    pub all_predictions: Vec<SecondaryBlock>,
}

/// Run the golden predictor, then everyone else.
///
/// The golden prediction must succeed; a secondary failure is reported in its
/// block so the block count always equals roster size minus one.
pub fn compose(
    roster: &[RosterEntry],
    golden: usize,
    fixture: &dyn MatchLike,
    rng: &mut dyn RngCore,
) -> Result<ConsensusResult> {
    fixture.require_teams()?;

    let entry = &roster[golden];
    let prediction = entry.predictor.predict(fixture, &mut *rng)?;
    let golden_algorithm = GoldenBlock {
        name: entry.name().to_string(),
        accuracy: entry.accuracy,
        prediction,
    };

    let all_predictions = roster
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != golden)
        .map(|(_, entry)| match entry.predictor.predict(fixture, &mut *rng) {
            Ok(p) => SecondaryBlock {
                algorithm: entry.name().to_string(),
                prediction: Some(p.prediction),
                confidence: Some(p.confidence),
                details: p.details,
                accuracy: entry.accuracy,
            },
            Err(e) => {
                tracing::warn!("{} failed during consensus: {}", entry.name(), e);
                SecondaryBlock {
                    algorithm: entry.name().to_string(),
                    prediction: None,
                    confidence: None,
                    details: format!("Prediction failed: {}", e),
                    accuracy: entry.accuracy,
                }
            }
        })
        .collect();

    Ok(ConsensusResult {
        golden_algorithm,
        all_predictions,
    })
}
