//! Engineered features for the model-based predictors
//!
//! Each historical match is reduced to home-minus-away differentials:
//! - goal difference
//! - expected-goals difference
//! - possession edge (home share minus 50)
//! - injury differential

use crate::types::{MatchRecord, Outcome};
use serde::Serialize;

/// Features of one historical match, all from the home side's perspective
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub goal_diff: f64,
    pub xg_diff: f64,
    pub possession_edge: f64,
    pub injury_diff: f64,
    pub label: Outcome,
}

impl FeatureRow {
    pub fn from_record(record: &MatchRecord) -> Self {
        Self {
            goal_diff: record.home_score as f64 - record.away_score as f64,
            xg_diff: record.home_xg - record.away_xg,
            possession_edge: record.possession_home as f64 - 50.0,
            injury_diff: record.injuries_home as f64 - record.injuries_away as f64,
            label: record.result,
        }
    }
}

/// Column means over a training set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub rows: usize,
    pub mean_goal_diff: f64,
    pub mean_xg_diff: f64,
    pub mean_possession_edge: f64,
    pub mean_injury_diff: f64,
    pub home_win_rate: f64,
}

impl FeatureSummary {
    pub fn from_rows(rows: &[FeatureRow]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let n = rows.len() as f64;
        let mean = |f: fn(&FeatureRow) -> f64| rows.iter().map(f).sum::<f64>() / n;

        Self {
            rows: rows.len(),
            mean_goal_diff: mean(|r| r.goal_diff),
            mean_xg_diff: mean(|r| r.xg_diff),
            mean_possession_edge: mean(|r| r.possession_edge),
            mean_injury_diff: mean(|r| r.injury_diff),
            home_win_rate: rows.iter().filter(|r| r.label == Outcome::Home).count() as f64 / n,
        }
    }
}
