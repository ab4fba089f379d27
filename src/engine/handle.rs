//! Shared engine access for the serving layer
//!
//! A training/evaluation cycle holds the write lock; consensus queries share
//! the read lock. The first query against an untrained engine upgrades to the
//! write lock and re-checks, so concurrent first queries run one cycle.

use super::{ConsensusResult, DashboardSummary, Engine, Ranking};
use crate::data::DatasetProvider;
use crate::error::Result;
use crate::types::{Dataset, MatchLike};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lifecycle as seen by the serving layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason")]
pub enum EngineStatus {
    /// No cycle has completed yet, or one is running
    Training,
    Ready,
    /// The last initialization failed before any cycle completed
    Unavailable(String),
}

/// Dashboard payload; always answerable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum DashboardView {
    Ready(DashboardSummary),
    #[serde(rename = "Training...")]
    Training,
    Unavailable { reason: String },
}

struct Inner {
    engine: RwLock<Engine>,
    provider: Arc<dyn DatasetProvider>,
    /// Set when the most recent initialization failed
    failure: Mutex<Option<String>>,
    /// Present only when a seed is configured
    rng: Option<Mutex<StdRng>>,
}

#[derive(Clone)]
pub struct EngineHandle {
    inner: Arc<Inner>,
}

impl EngineHandle {
    pub fn new(engine: Engine, provider: Arc<dyn DatasetProvider>, seed: Option<u64>) -> Self {
        Self {
            inner: Arc::new(Inner {
                engine: RwLock::new(engine),
                provider,
                failure: Mutex::new(None),
                rng: seed.map(|s| Mutex::new(StdRng::seed_from_u64(s))),
            }),
        }
    }

    /// Run `f` with the seeded generator, or a thread-local one
    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match &self.inner.rng {
            Some(rng) => f(&mut *rng.lock()),
            None => f(&mut rand::rng()),
        }
    }

    /// Fetch a fresh dataset and run train + evaluate + select
    pub async fn initialize(&self) -> Result<()> {
        let mut engine = self.inner.engine.write().await;
        self.run_cycle(&mut engine).await
    }

    async fn run_cycle(&self, engine: &mut Engine) -> Result<()> {
        tracing::info!("Initializing Engine...");
        let records = match self.inner.provider.fetch_historical_matches().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Initialization failed: {}", e);
                *self.inner.failure.lock() = Some(e.to_string());
                return Err(e);
            }
        };

        self.with_rng(|rng| {
            engine.run_cycle(Dataset::new(records), rng);
        });
        *self.inner.failure.lock() = None;
        Ok(())
    }

    pub fn status(&self) -> EngineStatus {
        let failure = self.inner.failure.lock().clone();
        match self.inner.engine.try_read() {
            Ok(engine) if engine.is_initialized() => EngineStatus::Ready,
            _ => match failure {
                Some(reason) => EngineStatus::Unavailable(reason),
                None => EngineStatus::Training,
            },
        }
    }

    /// Never waits on a running cycle
    pub fn dashboard(&self) -> DashboardView {
        let summary = self
            .inner
            .engine
            .try_read()
            .ok()
            .and_then(|engine| engine.dashboard_summary().ok());
        match summary {
            Some(summary) => DashboardView::Ready(summary),
            None => match self.inner.failure.lock().clone() {
                Some(reason) => DashboardView::Unavailable { reason },
                None => DashboardView::Training,
            },
        }
    }

    pub async fn rankings(&self) -> Vec<Ranking> {
        self.inner.engine.read().await.rankings()
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.inner.engine.read().await.dashboard_summary()
    }

    /// Consensus for one match, initializing the engine on first use
    pub async fn analyze<M>(&self, fixture: &M) -> Result<ConsensusResult>
    where
        M: MatchLike + Sync,
    {
        {
            let engine = self.inner.engine.read().await;
            if engine.is_initialized() {
                return self.with_rng(|rng| engine.analyze(fixture, rng));
            }
        }

        let mut engine = self.inner.engine.write().await;
        if !engine.is_initialized() {
            tracing::info!("No evaluation cycle yet, initializing before analysis");
            self.run_cycle(&mut engine).await?;
        }
        let engine = engine.downgrade();
        self.with_rng(|rng| engine.analyze(fixture, rng))
    }
}
