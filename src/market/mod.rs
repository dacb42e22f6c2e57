//! Market clearing.

pub mod clearing;
/// Bracket search and Brent refinement.
pub mod solver;

pub use clearing::{EnergyMarket, MarketState, clear_price};
pub use solver::SolverOptions;
