//! Error types for the prediction engine

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum OracleError {
    /// A match-like record lacks a field the predictor needs
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Historical record whose outcome label disagrees with its score
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Golden predictor requested before any evaluation cycle
    #[error("Engine not initialized: no evaluation cycle has completed")]
    NotInitialized,

    #[error("Data provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OracleError>;
