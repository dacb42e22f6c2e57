//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use energy_transition::consumer::InelasticConsumer;
use energy_transition::sectors::{MarketParameters, ModelParameters, TechnologyParameters};

/// Baseline demand (1000 units per period).
pub fn baseline_consumer() -> InelasticConsumer {
    InelasticConsumer::new(1000.0).expect("baseline demand is positive")
}

/// Renewable technology (alpha 0.3, tfp 3.692).
pub fn renewable_technology() -> TechnologyParameters {
    TechnologyParameters::new(0.3, 3.692).expect("renewable technology is valid")
}

/// Non-renewable technology (beta 0.67, tfp 2.0).
pub fn non_renewable_technology() -> TechnologyParameters {
    TechnologyParameters::new(0.67, 2.0).expect("non-renewable technology is valid")
}

/// Market with adjustment cost `phi` (r 1.09, fuel price 1.0, eta 0.9).
pub fn market_with_adjustment_cost(phi: f64) -> MarketParameters {
    MarketParameters::new(1.09, 1.0, phi, 0.9).expect("market parameters are valid")
}

/// Baseline parameters with the given adjustment cost.
pub fn parameters_with_adjustment_cost(phi: f64) -> ModelParameters {
    ModelParameters {
        renewable: renewable_technology(),
        non_renewable: non_renewable_technology(),
        market: market_with_adjustment_cost(phi),
    }
}

/// Baseline parameters (phi 0.2).
pub fn baseline_parameters() -> ModelParameters {
    parameters_with_adjustment_cost(0.2)
}

/// Seed capital used by the baseline scenario.
pub const SEED_CAPITAL: [f64; 2] = [600.0, 600.0];
