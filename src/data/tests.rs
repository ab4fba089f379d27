//! Tests for data providers

use super::*;
use crate::config::DataConfig;
use crate::types::MatchRecord;
use chrono::{NaiveDate, Utc};
use std::io::Write;
use tempfile::NamedTempFile;
use tokio_test::{assert_err, assert_ok};

fn synthetic(seed: u64) -> SyntheticProvider {
    SyntheticProvider::new(DataConfig::default(), Some(seed)).unwrap()
}

#[test]
fn test_synthetic_matches_are_consistent() {
    let matches = synthetic(1).generate_matches(70);
    assert_eq!(matches.len(), 70);

    for record in &matches {
        record.validate().unwrap();
        assert_ne!(record.home_team, record.away_team);
        assert!((30..=70).contains(&record.possession_home));
        assert!(record.injuries_home <= 3 && record.injuries_away <= 3);
        assert!(record.home_xg >= 0.5 && record.home_xg <= 3.0);
    }
}

#[test]
fn test_synthetic_matches_are_chronological() {
    let matches = synthetic(2).generate_matches(30);
    assert!(matches.windows(2).all(|w| w[0].date < w[1].date));

    let yesterday = Utc::now().date_naive() - chrono::Duration::days(1);
    assert!(matches.last().unwrap().date <= yesterday);
}

#[test]
fn test_synthetic_is_reproducible_with_seed() {
    let a = synthetic(42).generate_matches(20);
    let b = synthetic(42).generate_matches(20);
    let scores = |m: &[MatchRecord]| -> Vec<(u32, u32)> {
        m.iter().map(|r| (r.home_score, r.away_score)).collect()
    };
    assert_eq!(scores(&a), scores(&b));

    let teams = |m: &[MatchRecord]| -> Vec<String> { m.iter().map(|r| r.home_team.clone()).collect() };
    assert_eq!(teams(&a), teams(&b));
    assert_ne!(teams(&a), teams(&synthetic(43).generate_matches(20)));
}

#[test]
fn test_synthetic_needs_two_teams() {
    let config = DataConfig {
        teams: vec!["Galatasaray".to_string()],
        ..Default::default()
    };
    let err = SyntheticProvider::new(config, None).err().unwrap();
    assert!(matches!(err, OracleError::Provider(_)));
}

#[test]
fn test_synthetic_fixtures() {
    let provider = synthetic(3);
    let fixtures = provider.fixtures();
    let ids: Vec<&str> = fixtures.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["match_0", "match_1", "match_2", "match_3", "match_4"]);

    let pool = &DataConfig::default().teams[..4];
    for fixture in fixtures {
        assert!(pool.contains(&fixture.home_team));
        assert!(pool.contains(&fixture.away_team));
        assert_ne!(fixture.home_team, fixture.away_team);
        assert_eq!(fixture.league, "Super Lig");
        assert_eq!(fixture.date.len(), "2024-01-01 12:00".len());
    }
}

#[tokio::test]
async fn test_synthetic_fixtures_are_stable_across_fetches() {
    let provider = synthetic(8);
    let first = provider.fetch_upcoming_fixtures().await.unwrap();
    let second = provider.fetch_upcoming_fixtures().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, provider.fixtures());

    // fixture fetches do not shift the seeded match stream
    let untouched = synthetic(8);
    assert_eq!(provider.generate_matches(15), untouched.generate_matches(15));
}

#[tokio::test]
async fn test_synthetic_provider_uses_configured_counts() {
    let config = DataConfig {
        synthetic_matches: 12,
        synthetic_fixtures: 2,
        ..Default::default()
    };
    let provider = SyntheticProvider::new(config, Some(7)).unwrap();
    assert_eq!(provider.fetch_historical_matches().await.unwrap().len(), 12);
    assert_eq!(provider.fetch_upcoming_fixtures().await.unwrap().len(), 2);
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_json_file_provider_reads_matches() {
    let records = vec![
        MatchRecord::new(date(2024, 3, 1), "Galatasaray", "Fenerbahce", 3, 1),
        MatchRecord::new(date(2024, 3, 8), "Besiktas", "Galatasaray", 0, 0),
    ];
    let file = json_file(&serde_json::to_string(&records).unwrap());

    let provider = JsonFileProvider::new(file.path().to_string_lossy(), None);
    let loaded = provider.fetch_historical_matches().await.unwrap();
    assert_eq!(loaded, records);
    assert!(provider.fetch_upcoming_fixtures().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_json_file_provider_reads_fixtures() {
    let matches = json_file("[]");
    let fixtures = json_file(
        r#"[{"id": "derby", "home_team": "Galatasaray", "away_team": "Fenerbahce",
             "date": "2024-05-19 19:00", "league": "Super Lig"}]"#,
    );
    let provider = JsonFileProvider::new(
        matches.path().to_string_lossy(),
        Some(fixtures.path().to_string_lossy().into_owned()),
    );

    assert!(provider.fetch_historical_matches().await.unwrap().is_empty());
    let loaded = provider.fetch_upcoming_fixtures().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "derby");
}

#[tokio::test]
async fn test_json_file_provider_errors() {
    let provider = JsonFileProvider::new("/nonexistent/matches.json", None);
    let err = assert_err!(provider.fetch_historical_matches().await);
    assert!(matches!(err, OracleError::Io(_)));

    let garbage = json_file("{not json");
    let provider = JsonFileProvider::new(garbage.path().to_string_lossy(), None);
    let err = assert_err!(provider.fetch_historical_matches().await);
    assert!(matches!(err, OracleError::Json(_)));
}

#[test]
fn test_build_providers() {
    let mut config = AppConfig::default();
    assert_ok!(build_providers(&config));

    config.data.source = DataSource::File;
    let err = build_providers(&config).err().unwrap();
    assert!(matches!(err, OracleError::Provider(_)));

    config.data.matches_path = Some("~/matches.json".to_string());
    assert_ok!(build_providers(&config));
}
