//! Core types: match records, fixtures and predictions

use crate::error::{OracleError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full-time result in 1X2 notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "1")]
    Home,
    #[serde(rename = "X")]
    Draw,
    #[serde(rename = "2")]
    Away,
}

impl Outcome {
    /// Tie-break order used whenever outcomes are ranked
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    /// Outcome implied by a final score
    pub fn from_score(home: u32, away: u32) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Outcome::Home,
            std::cmp::Ordering::Less => Outcome::Away,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Home => "1",
            Outcome::Draw => "X",
            Outcome::Away => "2",
        }
    }

    fn index(&self) -> usize {
        match self {
            Outcome::Home => 0,
            Outcome::Draw => 1,
            Outcome::Away => 2,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Weather category recorded with a historical match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Sunny, Weather::Rainy, Weather::Cloudy, Weather::Snowy];
}

/// Anything a predictor can be asked about: it only needs the two sides
pub trait MatchLike {
    fn home_team(&self) -> Option<&str>;
    fn away_team(&self) -> Option<&str>;

    /// Both team identifiers, or `MissingField` for the first absent one
    fn require_teams(&self) -> Result<(&str, &str)> {
        let home = self
            .home_team()
            .filter(|t| !t.trim().is_empty())
            .ok_or(OracleError::MissingField("home_team"))?;
        let away = self
            .away_team()
            .filter(|t| !t.trim().is_empty())
            .ok_or(OracleError::MissingField("away_team"))?;
        Ok((home, away))
    }
}

/// Settled historical match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub total_goals: u32,
    pub result: Outcome,
    #[serde(default, rename = "home_xG")]
    pub home_xg: f64,
    #[serde(default, rename = "away_xG")]
    pub away_xg: f64,
    #[serde(default = "default_possession")]
    pub possession_home: u8,
    #[serde(default = "default_weather")]
    pub weather: Weather,
    #[serde(default)]
    pub injuries_home: u8,
    #[serde(default)]
    pub injuries_away: u8,
}

fn default_possession() -> u8 {
    50
}

fn default_weather() -> Weather {
    Weather::Sunny
}

impl MatchRecord {
    /// Build a record whose derived fields agree with the score
    pub fn new(
        date: NaiveDate,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            date,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score,
            away_score,
            total_goals: home_score + away_score,
            result: Outcome::from_score(home_score, away_score),
            home_xg: 0.0,
            away_xg: 0.0,
            possession_home: default_possession(),
            weather: default_weather(),
            injuries_home: 0,
            injuries_away: 0,
        }
    }

    /// Check label and derived total against the score
    pub fn validate(&self) -> Result<()> {
        self.require_teams()?;
        let expected = Outcome::from_score(self.home_score, self.away_score);
        if self.result != expected {
            return Err(OracleError::DataIntegrity(format!(
                "{} vs {} on {}: score {}-{} implies {} but labelled {}",
                self.home_team,
                self.away_team,
                self.date,
                self.home_score,
                self.away_score,
                expected,
                self.result
            )));
        }
        if self.total_goals != self.home_score + self.away_score {
            return Err(OracleError::DataIntegrity(format!(
                "{} vs {} on {}: total_goals {} != {} + {}",
                self.home_team,
                self.away_team,
                self.date,
                self.total_goals,
                self.home_score,
                self.away_score
            )));
        }
        Ok(())
    }
}

impl MatchLike for MatchRecord {
    fn home_team(&self) -> Option<&str> {
        Some(&self.home_team)
    }

    fn away_team(&self) -> Option<&str> {
        Some(&self.away_team)
    }
}

/// Scheduled match without a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    /// Kick-off, `YYYY-MM-DD HH:MM`
    pub date: String,
    pub league: String,
}

impl MatchLike for FixtureRecord {
    fn home_team(&self) -> Option<&str> {
        Some(&self.home_team)
    }

    fn away_team(&self) -> Option<&str> {
        Some(&self.away_team)
    }
}

/// Ad-hoc match description (CLI input, serving-layer placeholder)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub date: Option<String>,
}

impl MatchQuery {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: Some(home_team.into()),
            away_team: Some(away_team.into()),
            date: None,
        }
    }
}

impl MatchLike for MatchQuery {
    fn home_team(&self) -> Option<&str> {
        self.home_team.as_deref()
    }

    fn away_team(&self) -> Option<&str> {
        self.away_team.as_deref()
    }
}

/// One predictor's answer for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Outcome,
    /// Predictor-specific; not comparable across variants
    pub confidence: f64,
    pub details: String,
}

/// Per-outcome tally or probability mass, indexed by `Outcome`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutcomeTable(pub [f64; 3]);

impl OutcomeTable {
    pub fn get(&self, outcome: Outcome) -> f64 {
        self.0[outcome.index()]
    }

    pub fn add(&mut self, outcome: Outcome, value: f64) {
        self.0[outcome.index()] += value;
    }

    /// Largest entry; earlier outcome wins a tie
    pub fn argmax(&self) -> (Outcome, f64) {
        let mut best = (Outcome::Home, self.get(Outcome::Home));
        for outcome in [Outcome::Draw, Outcome::Away] {
            let value = self.get(outcome);
            if value > best.1 {
                best = (outcome, value);
            }
        }
        best
    }
}

/// Historical matches in the order the provider supplied them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<MatchRecord>,
}

impl Dataset {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Trailing `fraction` of the dataset, `floor(fraction * len)` records
    pub fn holdout(&self, fraction: f64) -> &[MatchRecord] {
        let size = ((self.records.len() as f64) * fraction.clamp(0.0, 1.0)).floor() as usize;
        &self.records[self.records.len() - size..]
    }

    /// Records passing `validate`, plus the number skipped
    pub fn partition_valid(&self) -> (Vec<MatchRecord>, usize) {
        let mut skipped = 0;
        let valid = self
            .records
            .iter()
            .filter(|record| match record.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Skipping record: {}", e);
                    skipped += 1;
                    false
                }
            })
            .cloned()
            .collect();
        (valid, skipped)
    }
}

impl From<Vec<MatchRecord>> for Dataset {
    fn from(records: Vec<MatchRecord>) -> Self {
        Self::new(records)
    }
}
