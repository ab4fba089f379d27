//! Router tests

use super::*;
use crate::config::{DataConfig, EngineConfig, ModelConfig};
use crate::data::{MockDatasetProvider, MockFixtureProvider, SyntheticProvider};
use crate::engine::Engine;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use serde_json::Value;
use tower::ServiceExt;

fn synthetic_state() -> ApiState {
    let provider = Arc::new(SyntheticProvider::new(DataConfig::default(), Some(17)).unwrap());
    let engine = Engine::with_default_roster(&ModelConfig::default(), &EngineConfig::default());
    ApiState {
        engine: EngineHandle::new(engine, provider.clone(), Some(17)),
        fixtures: provider,
    }
}

async fn get_json(state: &ApiState, uri: &str) -> (StatusCode, Value) {
    let response = create_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_root_and_health() {
    let state = synthetic_state();
    let (status, body) = get_json(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Active");

    let response = create_router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_dashboard_before_and_after_initialization() {
    let state = synthetic_state();
    let (_, body) = get_json(&state, "/api/dashboard").await;
    assert_eq!(body["status"], "Training...");

    state.engine.initialize().await.unwrap();
    let (status, body) = get_json(&state, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Ready");
    assert_eq!(body["algorithms_tested"], 20);
    assert_eq!(body["data_points"], 70);
    assert!(body["golden_algorithm"].is_string());
}

#[tokio::test]
async fn test_matches_lists_fixtures() {
    let (status, body) = get_json(&synthetic_state(), "/api/matches").await;
    assert_eq!(status, StatusCode::OK);
    let fixtures = body.as_array().unwrap();
    assert_eq!(fixtures.len(), 5);
    assert_eq!(fixtures[0]["id"], "match_0");
    assert_eq!(fixtures[0]["league"], "Super Lig");
}

#[tokio::test]
async fn test_analyze_listed_fixture() {
    let state = synthetic_state();
    let (status, body) = get_json(&state, "/api/analyze/match_2").await;
    assert_eq!(status, StatusCode::OK);

    let golden = &body["golden_algorithm"];
    assert!(golden["name"].is_string());
    assert!(["1", "X", "2"].contains(&golden["prediction"]["prediction"].as_str().unwrap()));
    assert_eq!(body["all_predictions"].as_array().unwrap().len(), 19);
}

#[tokio::test]
async fn test_analyze_unknown_fixture_uses_placeholder() {
    let (status, body) = get_json(&synthetic_state(), "/api/analyze/no_such_match").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["all_predictions"].as_array().unwrap().len(), 19);
}

#[tokio::test]
async fn test_analyze_fixture_without_team_is_unprocessable() {
    let mut fixtures = MockFixtureProvider::new();
    fixtures.expect_fetch_upcoming_fixtures().returning(|| {
        Ok(vec![FixtureRecord {
            id: "blank".to_string(),
            home_team: String::new(),
            away_team: "Fenerbahce".to_string(),
            date: "2024-05-19 19:00".to_string(),
            league: "Super Lig".to_string(),
        }])
    });
    let provider = Arc::new(SyntheticProvider::new(DataConfig::default(), Some(2)).unwrap());
    let engine = Engine::with_default_roster(&ModelConfig::default(), &EngineConfig::default());
    let state = ApiState {
        engine: EngineHandle::new(engine, provider, Some(2)),
        fixtures: Arc::new(fixtures),
    };

    let (status, body) = get_json(&state, "/api/analyze/blank").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Missing field: home_team");
}

#[tokio::test]
async fn test_analyze_falls_back_when_fixture_source_fails() {
    let mut fixtures = MockFixtureProvider::new();
    fixtures
        .expect_fetch_upcoming_fixtures()
        .returning(|| Err(OracleError::Provider("fixtures file unreadable".to_string())));
    let provider = Arc::new(SyntheticProvider::new(DataConfig::default(), Some(6)).unwrap());
    let engine = Engine::with_default_roster(&ModelConfig::default(), &EngineConfig::default());
    let state = ApiState {
        engine: EngineHandle::new(engine, provider, Some(6)),
        fixtures: Arc::new(fixtures),
    };

    let (status, body) = get_json(&state, "/api/analyze/match_0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["all_predictions"].as_array().unwrap().len(), 19);

    let (status, _) = get_json(&state, "/api/matches").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_provider_failure_is_unavailable() {
    let mut matches = MockDatasetProvider::new();
    matches
        .expect_fetch_historical_matches()
        .returning(|| Err(OracleError::Provider("scraper down".to_string())));
    let fixtures = Arc::new(SyntheticProvider::new(DataConfig::default(), Some(4)).unwrap());
    let engine = Engine::with_default_roster(&ModelConfig::default(), &EngineConfig::default());
    let state = ApiState {
        engine: EngineHandle::new(engine, Arc::new(matches), None),
        fixtures,
    };

    let (status, _) = get_json(&state, "/api/analyze/match_0").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = get_json(&state, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Unavailable");
    assert!(body["reason"].as_str().unwrap().contains("scraper down"));
}

#[tokio::test]
async fn test_algorithms_leaderboard() {
    let state = synthetic_state();
    state.engine.initialize().await.unwrap();

    let (status, body) = get_json(&state, "/api/algorithms").await;
    assert_eq!(status, StatusCode::OK);
    let rankings = body.as_array().unwrap();
    assert_eq!(rankings.len(), 20);
    assert_eq!(rankings[0]["rank"], 1);
    assert_eq!(rankings[0]["golden"], true);

    let accuracies: Vec<f64> = rankings.iter().map(|r| r["accuracy"].as_f64().unwrap()).collect();
    assert!(accuracies.windows(2).all(|w| w[0] >= w[1]));
}
