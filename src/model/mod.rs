//! Outcome predictors
//!
//! Every algorithm implements [`Predictor`]: it is trained in place on the
//! historical dataset and then answers 1X2 questions for any match-like record.
//! Variants:
//! - Distributional scoring (Poisson scoreline grid)
//! - Repeated-trial simulation (Monte Carlo)
//! - Rating table (Elo)
//! - Model-based placeholders fed by engineered features
//! - Static heuristics padding the evaluation pool

mod elo;
pub mod features;
mod heuristic;
mod monte_carlo;
mod placeholder;
mod poisson;

pub use elo::EloPredictor;
pub use features::{FeatureRow, FeatureSummary};
pub use heuristic::StaticHeuristic;
pub use monte_carlo::MonteCarloPredictor;
pub use placeholder::PlaceholderModel;
pub use poisson::PoissonPredictor;

pub(crate) use monte_carlo::sample_poisson;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::types::{MatchLike, MatchRecord, Outcome, PredictionResult};
use rand::RngCore;

/// Trait for outcome predictors
pub trait Predictor: Send + Sync {
    /// Unique name within a roster
    fn name(&self) -> &str;

    /// Refit internal state from scratch on `data`.
    ///
    /// Retraining on the same data yields equivalent state. An empty slice
    /// leaves the predictor in its neutral default.
    fn train(&mut self, data: &[MatchRecord]) -> Result<()>;

    /// Predict without touching fit state. Only randomized variants read `rng`.
    fn predict(&self, fixture: &dyn MatchLike, rng: &mut dyn RngCore) -> Result<PredictionResult>;
}

/// Reject training data whose labels disagree with the scores
pub(crate) fn ensure_consistent(data: &[MatchRecord]) -> Result<()> {
    data.iter().try_for_each(MatchRecord::validate)
}

/// Heuristic names padding the default roster
pub const HEURISTIC_NAMES: [&str; 15] = [
    "Form Analysis",
    "Head-to-Head",
    "Goal Averages",
    "Defensive Strength",
    "Offensive Efficiency",
    "Weather Impact",
    "Referee Strictness",
    "Injury Impact",
    "Market Odds Value",
    "Linear Regression Trend",
    "Exponential Smoothing",
    "Corner Prediction Model",
    "Card Probability",
    "Half-Time Correlation",
    "Team Morale Index",
];

/// The production roster, in registration order
pub fn default_roster(config: &ModelConfig) -> Vec<Box<dyn Predictor>> {
    let mut roster: Vec<Box<dyn Predictor>> = vec![
        Box::new(PoissonPredictor::new(config)),
        Box::new(MonteCarloPredictor::new(config)),
        Box::new(PlaceholderModel::new(
            "XGBoost Classifier",
            Outcome::Home,
            0.65,
            "Gradient Boosting favors Home team based on recent form features.",
        )),
        Box::new(PlaceholderModel::new(
            "Random Forest",
            Outcome::Home,
            0.60,
            "Decision trees indicate home advantage.",
        )),
        Box::new(EloPredictor::new(config)),
    ];
    roster.extend(
        HEURISTIC_NAMES
            .iter()
            .map(|name| Box::new(StaticHeuristic::random(*name)) as Box<dyn Predictor>),
    );
    roster
}
