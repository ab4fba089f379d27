//! Static heuristics

use super::Predictor;
use crate::error::Result;
use crate::types::{MatchLike, MatchRecord, Outcome, PredictionResult};
use rand::{Rng, RngCore};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Call {
    /// Uniform outcome, confidence in [0.4, 0.9)
    Random,
    Fixed { outcome: Outcome, confidence: f64 },
}

/// Untrained predictor with a canned answer
pub struct StaticHeuristic {
    name: String,
    call: Call,
}

impl StaticHeuristic {
    pub fn random(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            call: Call::Random,
        }
    }

    pub fn fixed(name: impl Into<String>, outcome: Outcome, confidence: f64) -> Self {
        Self {
            name: name.into(),
            call: Call::Fixed { outcome, confidence },
        }
    }
}

impl Predictor for StaticHeuristic {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&mut self, _data: &[MatchRecord]) -> Result<()> {
        Ok(())
    }

    fn predict(&self, fixture: &dyn MatchLike, rng: &mut dyn RngCore) -> Result<PredictionResult> {
        fixture.require_teams()?;
        let (prediction, confidence) = match self.call {
            Call::Random => (
                Outcome::ALL[rng.random_range(0..Outcome::ALL.len())],
                rng.random_range(0.4..0.9),
            ),
            Call::Fixed { outcome, confidence } => (outcome, confidence),
        };

        Ok(PredictionResult {
            prediction,
            confidence,
            details: format!("{} analyzed specific metrics.", self.name),
        })
    }
}
