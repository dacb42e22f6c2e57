//! Long-run equilibrium of the capital recursion.
//!
//! With fossil fuel bought in proportion to capital, the value marginal
//! product of capital depends on the energy price alone. The steady state is
//! the price at which it equals the gross interest rate, and the capital
//! stock that lets the market clear at that price.

use serde::Serialize;

use crate::consumer::Consumer;
use crate::error::{ModelError, Result, ensure_positive};
use crate::sectors::non_renewable::fossil_fuel_demand;
use crate::sectors::{EnergySector, ModelParameters, RenewableCapital, RenewableSector};

/// Fixed point of the simulator: seeding it here keeps capital in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteadyState {
    pub energy_price: f64,
    /// Non-renewable capital.
    pub capital: f64,
    /// Fossil fuel bought by the non-renewable sector.
    pub fossil_fuel: f64,
    pub renewable_capital: f64,
}

/// Computes the steady state for `consumer` and `parameters`.
///
/// # Arguments
///
/// * `consumer` - Source of energy demand
/// * `parameters` - Technologies and market parameters
/// * `renewable_capital` - How the renewable sector's capital is determined
///
/// # Errors
///
/// * `ModelError::NoEquilibrium` - renewables alone cover demand at the
///   steady-state price, so no positive non-renewable capital exists
/// * `ModelError::Domain` - an intermediate quantity is not finite
pub fn steady_state(
    consumer: &dyn Consumer,
    parameters: &ModelParameters,
    renewable_capital: RenewableCapital,
) -> Result<SteadyState> {
    let tech = &parameters.non_renewable;
    let market = &parameters.market;
    let beta = tech.capital_share();
    let tfp = tech.tfp();

    // VMP(p) = beta * tfp * c^((1 - beta) / beta) * p^(1 / beta)
    let c = tfp * (1.0 - beta) / market.fossil_fuel_price();
    let scale = beta * tfp * c.powf((1.0 - beta) / beta);
    let energy_price = ensure_positive(
        "steady-state energy price",
        (market.gross_interest_rate() / scale).powf(beta),
    )?;

    let fuel_per_capital = fossil_fuel_demand(energy_price, market.fossil_fuel_price(), tech)?;
    let output_per_capital = tfp * fuel_per_capital.powf(1.0 - beta);

    let renewable = RenewableSector::with_capital(parameters.renewable, renewable_capital)?;
    let residual_demand = consumer.demand() - renewable.supply(energy_price, market)?;
    let capital = residual_demand / output_per_capital;
    if !(capital.is_finite() && capital > 0.0) {
        return Err(ModelError::NoEquilibrium {
            lower: energy_price,
            upper: energy_price,
            expansions: 0,
        });
    }

    Ok(SteadyState {
        energy_price,
        capital,
        fossil_fuel: capital * fuel_per_capital,
        renewable_capital: renewable.capital_at(energy_price, market)?,
    })
}
