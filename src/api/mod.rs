//! HTTP API
//!
//! Thin axum layer over [`EngineHandle`]: dashboard, fixtures, per-match
//! consensus and the accuracy leaderboard.

use crate::data::FixtureProvider;
use crate::engine::{ConsensusResult, DashboardView, EngineHandle, Ranking};
use crate::error::OracleError;
use crate::types::{FixtureRecord, MatchQuery};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

#[cfg(test)]
mod tests;

const SYSTEM_NAME: &str = "Match Oracle v1.0";

/// Shared state for handlers
#[derive(Clone)]
pub struct ApiState {
    pub engine: EngineHandle,
    pub fixtures: Arc<dyn FixtureProvider>,
}

/// Error body plus status code
pub struct ApiError(OracleError);

impl From<OracleError> for ApiError {
    fn from(e: OracleError) -> Self {
        Self(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            OracleError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            OracleError::NotInitialized | OracleError::Provider(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

#[derive(Serialize)]
struct RootStatus {
    status: &'static str,
    system: &'static str,
}

async fn root() -> Json<RootStatus> {
    Json(RootStatus {
        status: "Active",
        system: SYSTEM_NAME,
    })
}

/// Health check
async fn health_check() -> &'static str {
    "OK"
}

/// Never blocks on a running cycle
async fn get_dashboard(State(state): State<ApiState>) -> Json<DashboardView> {
    Json(state.engine.dashboard())
}

async fn get_matches(State(state): State<ApiState>) -> Result<Json<Vec<FixtureRecord>>, ApiError> {
    Ok(Json(state.fixtures.fetch_upcoming_fixtures().await?))
}

/// Consensus for a listed fixture; unknown ids fall back to a demo derby
async fn analyze_match(
    State(state): State<ApiState>,
    Path(match_id): Path<String>,
) -> Result<Json<ConsensusResult>, ApiError> {
    let fixtures = state
        .fixtures
        .fetch_upcoming_fixtures()
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Fixture lookup failed for {}: {}", match_id, e);
            Vec::new()
        });
    let result = match fixtures.into_iter().find(|f| f.id == match_id) {
        Some(fixture) => state.engine.analyze(&fixture).await?,
        None => {
            tracing::warn!("Fixture {} not found, analyzing placeholder match", match_id);
            let placeholder = MatchQuery {
                date: Some("2024-05-19".to_string()),
                ..MatchQuery::new("Galatasaray", "Fenerbahce")
            };
            state.engine.analyze(&placeholder).await?
        }
    };
    Ok(Json(result))
}

async fn get_algorithms(State(state): State<ApiState>) -> Json<Vec<Ranking>> {
    Json(state.engine.rankings().await)
}

/// Create API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/matches", get(get_matches))
        .route("/api/analyze/{match_id}", get(analyze_match))
        .route("/api/algorithms", get(get_algorithms))
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn start_server(state: ApiState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    tracing::info!("API server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
