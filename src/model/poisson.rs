//! Independent-Poisson scoreline model
//!
//! Team strengths are ratios of a team's scoring (and conceding) rate to the
//! league rate, split by venue. The expected goal rates drive a capped
//! scoreline grid whose cells are summed into 1X2 buckets.

use super::{ensure_consistent, Predictor};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::types::{MatchLike, MatchRecord, Outcome, OutcomeTable, PredictionResult};
use rand::RngCore;
use std::collections::HashMap;

/// Venue-split strength ratios, 1.0 = league average
#[derive(Debug, Clone, Copy, PartialEq)]
struct Strength {
    attack: f64,
    defense: f64,
}

impl Default for Strength {
    fn default() -> Self {
        Self {
            attack: 1.0,
            defense: 1.0,
        }
    }
}

#[derive(Default)]
struct Tally {
    scored: u32,
    conceded: u32,
    games: u32,
}

pub struct PoissonPredictor {
    home_base_rate: f64,
    away_base_rate: f64,
    goal_cap: u32,
    home_strength: HashMap<String, Strength>,
    away_strength: HashMap<String, Strength>,
}

impl PoissonPredictor {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            home_base_rate: config.home_base_rate,
            away_base_rate: config.away_base_rate,
            goal_cap: config.goal_cap,
            home_strength: HashMap::new(),
            away_strength: HashMap::new(),
        }
    }

    /// Expected goals for each side
    pub fn expected_goals(&self, home: &str, away: &str) -> (f64, f64) {
        let h = self.home_strength.get(home).copied().unwrap_or_default();
        let a = self.away_strength.get(away).copied().unwrap_or_default();
        (
            h.attack * a.defense * self.home_base_rate,
            a.attack * h.defense * self.away_base_rate,
        )
    }

    /// Probability mass of each 1X2 bucket over the capped grid
    pub fn outcome_probabilities(&self, home: &str, away: &str) -> OutcomeTable {
        let (lambda_home, lambda_away) = self.expected_goals(home, away);
        let home_pmf = poisson_pmf(lambda_home, self.goal_cap);
        let away_pmf = poisson_pmf(lambda_away, self.goal_cap);

        let mut table = OutcomeTable::default();
        for (i, ph) in home_pmf.iter().enumerate() {
            for (j, pa) in away_pmf.iter().enumerate() {
                table.add(Outcome::from_score(i as u32, j as u32), ph * pa);
            }
        }
        table
    }
}

impl Predictor for PoissonPredictor {
    fn name(&self) -> &str {
        "Poisson Distribution"
    }

    fn train(&mut self, data: &[MatchRecord]) -> Result<()> {
        ensure_consistent(data)?;
        self.home_strength.clear();
        self.away_strength.clear();
        if data.is_empty() {
            return Ok(());
        }

        let n = data.len() as f64;
        let avg_home = data.iter().map(|m| m.home_score as f64).sum::<f64>() / n;
        let avg_away = data.iter().map(|m| m.away_score as f64).sum::<f64>() / n;

        let mut at_home: HashMap<&str, Tally> = HashMap::new();
        let mut on_road: HashMap<&str, Tally> = HashMap::new();
        for m in data {
            let t = at_home.entry(m.home_team.as_str()).or_default();
            t.scored += m.home_score;
            t.conceded += m.away_score;
            t.games += 1;

            let t = on_road.entry(m.away_team.as_str()).or_default();
            t.scored += m.away_score;
            t.conceded += m.home_score;
            t.games += 1;
        }

        // Home sides score against the league home rate and concede against the away rate
        for (team, t) in at_home {
            let games = t.games as f64;
            self.home_strength.insert(
                team.to_string(),
                Strength {
                    attack: ratio(t.scored as f64 / games, avg_home),
                    defense: ratio(t.conceded as f64 / games, avg_away),
                },
            );
        }
        for (team, t) in on_road {
            let games = t.games as f64;
            self.away_strength.insert(
                team.to_string(),
                Strength {
                    attack: ratio(t.scored as f64 / games, avg_away),
                    defense: ratio(t.conceded as f64 / games, avg_home),
                },
            );
        }

        tracing::debug!(
            "Poisson fitted {} home and {} away strength entries",
            self.home_strength.len(),
            self.away_strength.len()
        );
        Ok(())
    }

    fn predict(&self, fixture: &dyn MatchLike, _rng: &mut dyn RngCore) -> Result<PredictionResult> {
        let (home, away) = fixture.require_teams()?;
        let probs = self.outcome_probabilities(home, away);
        let (prediction, confidence) = probs.argmax();

        Ok(PredictionResult {
            prediction,
            confidence,
            details: format!(
                "Poisson probabilities: 1({:.2}), X({:.2}), 2({:.2})",
                probs.get(Outcome::Home),
                probs.get(Outcome::Draw),
                probs.get(Outcome::Away)
            ),
        })
    }
}

/// Strength ratio; a league that never scores leaves everyone average
fn ratio(rate: f64, league_rate: f64) -> f64 {
    if league_rate > 0.0 {
        rate / league_rate
    } else {
        1.0
    }
}

/// P(X = k) for k in 0..=max_k. Mass beyond the cap is dropped, not folded.
pub(crate) fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let lambda = lambda.max(0.0);
    let mut out = vec![0.0; max_k + 1];

    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}
