//! Elo rating table

use super::{ensure_consistent, Predictor};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::types::{MatchLike, MatchRecord, Outcome, PredictionResult};
use rand::RngCore;
use std::collections::HashMap;

const INITIAL_RATING: f64 = 1500.0;

pub struct EloPredictor {
    k: f64,
    home_advantage: f64,
    draw_margin: f64,
    ratings: HashMap<String, f64>,
}

impl EloPredictor {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            k: config.elo_k,
            home_advantage: config.elo_home_advantage,
            draw_margin: config.elo_draw_margin,
            ratings: HashMap::new(),
        }
    }

    pub fn rating(&self, team: &str) -> f64 {
        self.ratings.get(team).copied().unwrap_or(INITIAL_RATING)
    }
}

impl Predictor for EloPredictor {
    fn name(&self) -> &str {
        "Elo Rating System"
    }

    /// Replays the dataset in provider order from a fresh table
    fn train(&mut self, data: &[MatchRecord]) -> Result<()> {
        ensure_consistent(data)?;
        self.ratings.clear();

        for m in data {
            let rh = self.rating(&m.home_team);
            let ra = self.rating(&m.away_team);
            let expected_home = expected_score(rh + self.home_advantage, ra);
            let actual_home = match m.result {
                Outcome::Home => 1.0,
                Outcome::Draw => 0.5,
                Outcome::Away => 0.0,
            };

            let delta = self.k * (actual_home - expected_home);
            self.ratings.insert(m.home_team.clone(), rh + delta);
            self.ratings.insert(m.away_team.clone(), ra - delta);
        }
        Ok(())
    }

    fn predict(&self, fixture: &dyn MatchLike, _rng: &mut dyn RngCore) -> Result<PredictionResult> {
        let (home, away) = fixture.require_teams()?;
        let rh = self.rating(home);
        let ra = self.rating(away);
        let e = expected_score(rh + self.home_advantage, ra);

        let (prediction, confidence) = if (e - 0.5).abs() < self.draw_margin {
            (Outcome::Draw, e.min(1.0 - e))
        } else if e > 0.5 {
            (Outcome::Home, e)
        } else {
            (Outcome::Away, 1.0 - e)
        };

        let leader = if rh >= ra { "Home" } else { "Away" };
        Ok(PredictionResult {
            prediction,
            confidence,
            details: format!(
                "{} team has higher ELO rating ({:.0} vs {:.0}), expected home score {:.2}.",
                leader,
                rh.max(ra),
                rh.min(ra),
                e
            ),
        })
    }
}

fn expected_score(r_a: f64, r_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf(-(r_a - r_b) / 400.0))
}
