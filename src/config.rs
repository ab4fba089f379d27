//! Service configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `ORACLE_`-prefixed environment variables (`ORACLE_SERVER__PORT=9000`).

use crate::error::Result;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from `path` (missing file is fine) plus environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).into_owned();
        let config = config::Config::builder()
            .add_source(File::from(Path::new(&expanded)).required(false))
            .add_source(
                Environment::with_prefix("ORACLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Predictor parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// League base rate multiplied into the home strength ratio
    #[serde(default = "default_home_base_rate")]
    pub home_base_rate: f64,
    #[serde(default = "default_away_base_rate")]
    pub away_base_rate: f64,
    /// Highest goal count enumerated per side by the scoreline grid
    #[serde(default = "default_goal_cap")]
    pub goal_cap: u32,
    #[serde(default = "default_simulation_trials")]
    pub simulation_trials: u32,
    #[serde(default = "default_simulation_home_rate")]
    pub simulation_home_rate: f64,
    #[serde(default = "default_simulation_away_rate")]
    pub simulation_away_rate: f64,
    #[serde(default = "default_elo_k")]
    pub elo_k: f64,
    #[serde(default = "default_elo_home_advantage")]
    pub elo_home_advantage: f64,
    /// Expected-score band around 0.5 that is called a draw
    #[serde(default = "default_elo_draw_margin")]
    pub elo_draw_margin: f64,
}

fn default_home_base_rate() -> f64 {
    1.2
}

fn default_away_base_rate() -> f64 {
    1.0
}

fn default_goal_cap() -> u32 {
    5
}

fn default_simulation_trials() -> u32 {
    1000
}

fn default_simulation_home_rate() -> f64 {
    1.4
}

fn default_simulation_away_rate() -> f64 {
    1.1
}

fn default_elo_k() -> f64 {
    20.0
}

fn default_elo_home_advantage() -> f64 {
    60.0
}

fn default_elo_draw_margin() -> f64 {
    0.05
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            home_base_rate: default_home_base_rate(),
            away_base_rate: default_away_base_rate(),
            goal_cap: default_goal_cap(),
            simulation_trials: default_simulation_trials(),
            simulation_home_rate: default_simulation_home_rate(),
            simulation_away_rate: default_simulation_away_rate(),
            elo_k: default_elo_k(),
            elo_home_advantage: default_elo_home_advantage(),
            elo_draw_margin: default_elo_draw_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Trailing share of the dataset scored during backtest
    #[serde(default = "default_holdout_fraction")]
    pub holdout_fraction: f64,
    /// Fixed RNG seed for reproducible randomized predictors
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub initialize_on_startup: bool,
}

fn default_holdout_fraction() -> f64 {
    0.2
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            holdout_fraction: default_holdout_fraction(),
            seed: None,
            initialize_on_startup: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Synthetic,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_source")]
    pub source: DataSource,
    /// JSON array of historical matches (`source = "file"`)
    #[serde(default)]
    pub matches_path: Option<String>,
    /// JSON array of fixtures (`source = "file"`)
    #[serde(default)]
    pub fixtures_path: Option<String>,
    #[serde(default = "default_synthetic_matches")]
    pub synthetic_matches: usize,
    #[serde(default = "default_synthetic_fixtures")]
    pub synthetic_fixtures: usize,
    #[serde(default = "default_teams")]
    pub teams: Vec<String>,
    #[serde(default = "default_league")]
    pub league: String,
}

fn default_source() -> DataSource {
    DataSource::Synthetic
}

fn default_synthetic_matches() -> usize {
    70
}

fn default_synthetic_fixtures() -> usize {
    5
}

fn default_teams() -> Vec<String> {
    [
        "Galatasaray",
        "Fenerbahce",
        "Besiktas",
        "Trabzonspor",
        "Basaksehir",
        "Adana Demirspor",
        "Kayserispor",
        "Konyaspor",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

fn default_league() -> String {
    "Super Lig".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            matches_path: None,
            fixtures_path: None,
            synthetic_matches: default_synthetic_matches(),
            synthetic_fixtures: default_synthetic_fixtures(),
            teams: default_teams(),
            league: default_league(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
