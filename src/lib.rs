//! Two-sector energy transition model: renewable and fossil-fuel producers
//! selling into one energy market, with partial adjustment of fossil capital.

/// REST API over a finished run (requires the `api` feature).
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod consumer;
pub mod error;
pub mod io;
/// Market clearing and the bracketing root finder.
pub mod market;
pub mod scenario;
pub mod sectors;
/// Simulator, steady state, and trajectory summary.
pub mod sim;
pub mod sweep;

pub use error::{ModelError, Result};
