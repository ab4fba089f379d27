//! JSON files on disk

use super::{DatasetProvider, FixtureProvider};
use crate::error::Result;
use crate::types::{FixtureRecord, MatchRecord};
use async_trait::async_trait;

/// Reads a JSON array of matches (and optionally one of fixtures) on every fetch
pub struct JsonFileProvider {
    matches_path: String,
    fixtures_path: Option<String>,
}

impl JsonFileProvider {
    pub fn new(matches_path: impl Into<String>, fixtures_path: Option<String>) -> Self {
        Self {
            matches_path: shellexpand::tilde(&matches_path.into()).into_owned(),
            fixtures_path: fixtures_path.map(|p| shellexpand::tilde(&p).into_owned()),
        }
    }
}

#[async_trait]
impl DatasetProvider for JsonFileProvider {
    async fn fetch_historical_matches(&self) -> Result<Vec<MatchRecord>> {
        let raw = tokio::fs::read_to_string(&self.matches_path).await?;
        let records: Vec<MatchRecord> = serde_json::from_str(&raw)?;
        tracing::info!("Loaded {} matches from {}", records.len(), self.matches_path);
        Ok(records)
    }
}

#[async_trait]
impl FixtureProvider for JsonFileProvider {
    async fn fetch_upcoming_fixtures(&self) -> Result<Vec<FixtureRecord>> {
        let Some(path) = &self.fixtures_path else {
            return Ok(Vec::new());
        };
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
