//! Data collaborators
//!
//! The engine only sees two contracts: a provider of historical matches and a
//! provider of upcoming fixtures. Bundled implementations:
//! - [`SyntheticProvider`]: generated league data
//! - [`JsonFileProvider`]: JSON arrays on disk

mod file;
mod synthetic;
#[cfg(test)]
mod tests;

pub use file::JsonFileProvider;
pub use synthetic::SyntheticProvider;

use crate::config::{AppConfig, DataSource};
use crate::error::{OracleError, Result};
use crate::types::{FixtureRecord, MatchRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of settled matches, in a defined order (oldest first)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    async fn fetch_historical_matches(&self) -> Result<Vec<MatchRecord>>;
}

/// Source of scheduled matches
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixtureProvider: Send + Sync {
    async fn fetch_upcoming_fixtures(&self) -> Result<Vec<FixtureRecord>>;
}

/// Build the configured providers; one object usually serves both roles
pub fn build_providers(
    config: &AppConfig,
) -> Result<(Arc<dyn DatasetProvider>, Arc<dyn FixtureProvider>)> {
    match config.data.source {
        DataSource::Synthetic => {
            let provider = Arc::new(SyntheticProvider::new(config.data.clone(), config.engine.seed)?);
            let matches: Arc<dyn DatasetProvider> = provider.clone();
            let fixtures: Arc<dyn FixtureProvider> = provider;
            Ok((matches, fixtures))
        }
        DataSource::File => {
            let matches = config.data.matches_path.clone().ok_or_else(|| {
                OracleError::Provider("data.matches_path is required for the file source".to_string())
            })?;
            let provider = Arc::new(JsonFileProvider::new(matches, config.data.fixtures_path.clone()));
            let matches: Arc<dyn DatasetProvider> = provider.clone();
            let fixtures: Arc<dyn FixtureProvider> = provider;
            Ok((matches, fixtures))
        }
    }
}
