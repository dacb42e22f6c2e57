//! REST API for a finished simulation run.
//!
//! Provides two GET endpoints:
//! - `/state` - scenario, summary, steady state, and latest period
//! - `/trajectory` - per-period records with optional range filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::scenario::{Scenario, ScenarioRun};
use crate::sim::{PeriodResult, SteadyState, TrajectorySummary};

pub use types::{ErrorResponse, PeriodRecord, StateResponse, TrajectoryQuery};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc`; all data is read-only.
pub struct AppState {
    /// Scenario that was simulated.
    pub scenario: Scenario,
    /// Aggregate trajectory summary.
    pub summary: TrajectorySummary,
    /// Long-run equilibrium, if one exists.
    pub steady_state: Option<SteadyState>,
    /// Per-period simulation results.
    pub periods: Vec<PeriodResult>,
}

impl AppState {
    /// Captures a finished run.
    pub fn new(scenario: Scenario, out: ScenarioRun) -> Self {
        Self {
            scenario,
            summary: out.summary,
            steady_state: out.steady_state,
            periods: out.run.periods,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/trajectory", get(handlers::get_trajectory))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
