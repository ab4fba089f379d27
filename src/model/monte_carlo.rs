//! Repeated-trial match simulation

use super::Predictor;
use crate::config::ModelConfig;
use crate::error::Result;
use crate::types::{MatchLike, MatchRecord, Outcome, OutcomeTable, PredictionResult};
use rand::{Rng, RngCore};

/// Plays the match `trials` times with fixed scoring rates and reports the modal result
pub struct MonteCarloPredictor {
    trials: u32,
    home_rate: f64,
    away_rate: f64,
}

impl MonteCarloPredictor {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            trials: config.simulation_trials.max(1),
            home_rate: config.simulation_home_rate,
            away_rate: config.simulation_away_rate,
        }
    }

    /// Outcome counts over all trials
    pub fn simulate(&self, rng: &mut dyn RngCore) -> OutcomeTable {
        let mut counts = OutcomeTable::default();
        for _ in 0..self.trials {
            let home = sample_poisson(self.home_rate, &mut *rng);
            let away = sample_poisson(self.away_rate, &mut *rng);
            counts.add(Outcome::from_score(home, away), 1.0);
        }
        counts
    }
}

impl Predictor for MonteCarloPredictor {
    fn name(&self) -> &str {
        "Monte Carlo Simulation"
    }

    /// Rates are fixed, nothing to fit
    fn train(&mut self, _data: &[MatchRecord]) -> Result<()> {
        Ok(())
    }

    fn predict(&self, fixture: &dyn MatchLike, rng: &mut dyn RngCore) -> Result<PredictionResult> {
        fixture.require_teams()?;
        let (prediction, count) = self.simulate(rng).argmax();
        let confidence = count / self.trials as f64;

        Ok(PredictionResult {
            prediction,
            confidence,
            details: format!(
                "Simulated {} matches. Win rate: {:.1}%",
                self.trials,
                confidence * 100.0
            ),
        })
    }
}

/// Knuth's multiplication sampler; fine for the small rates used here
pub(crate) fn sample_poisson<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    if lambda <= 0.0 {
        return 0;
    }
    let limit = (-lambda).exp();
    let mut k = 0;
    let mut p = 1.0;
    loop {
        p *= rng.random::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}
