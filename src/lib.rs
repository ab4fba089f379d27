//! Match Oracle
//!
//! Football 1X2 prediction service that backtests a roster of algorithms and
//! serves the most accurate one's calls alongside everyone else's.
//!
//! ## Architecture
//!
//! ```text
//! DatasetProvider → Engine (Training → Backtest → Selector) → Consensus → API
//!                                  ↑
//!             Predictors (Poisson, Monte Carlo, Elo, placeholders, heuristics)
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod model;
pub mod types;
