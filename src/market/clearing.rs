//! Wholesale energy market: the price at which joint sector supply meets demand.

use serde::Serialize;
use tracing::debug;

use super::solver::{SolverOptions, find_root};
use crate::consumer::Consumer;
use crate::error::{Result, ensure_positive};
use crate::sectors::{
    EnergySector, MarketParameters, NonRenewableSector, RenewableCapital, RenewableSector,
    TechnologyParameters,
};

/// Prices prevailing after the market clears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketState {
    pub energy_price: f64,
    pub fossil_fuel_price: f64,
}

/// Market clearing engine.
///
/// Holds only solver settings; sectors and demand are passed per call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyMarket {
    options: SolverOptions,
}

impl EnergyMarket {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    /// Demand minus total supply at `energy_price`.
    ///
    /// # Errors
    ///
    /// Propagates domain errors raised by any sector.
    pub fn excess_demand(
        &self,
        energy_price: f64,
        consumer: &dyn Consumer,
        sectors: &[&dyn EnergySector],
        market: &MarketParameters,
    ) -> Result<f64> {
        let mut supply = 0.0;
        for sector in sectors {
            supply += sector.supply(energy_price, market)?;
        }
        Ok(consumer.demand() - supply)
    }

    /// Finds the energy price at which `sectors` jointly supply what
    /// `consumer` demands. The fossil-fuel price is taken from `market`.
    ///
    /// # Arguments
    ///
    /// * `consumer` - Source of energy demand
    /// * `sectors` - Producers whose supply is decreasing excess demand in price
    /// * `market` - Interest rate, fossil-fuel price, and investment technology
    /// * `seed` - Price to start the bracket search from, typically last period's
    ///
    /// # Errors
    ///
    /// * `ModelError::NoEquilibrium` - excess demand never changes sign
    /// * `ModelError::Convergence` - the root finder runs out of iterations
    /// * `ModelError::Domain` - a sector rejects a candidate price or an invalid seed
    pub fn clear(
        &self,
        consumer: &dyn Consumer,
        sectors: &[&dyn EnergySector],
        market: &MarketParameters,
        seed: Option<f64>,
    ) -> Result<MarketState> {
        let start = match seed {
            Some(price) => ensure_positive("seed price", price)?,
            None => self.options.initial_price,
        };
        let root = find_root(
            |price| self.excess_demand(price, consumer, sectors, market),
            start,
            &self.options,
        )?;
        debug!(
            energy_price = root.value,
            residual = root.residual,
            expansions = root.expansions,
            iterations = root.iterations,
            "market cleared"
        );
        Ok(MarketState {
            energy_price: root.value,
            fossil_fuel_price: market.fossil_fuel_price(),
        })
    }
}

/// Clears the two-sector market with default solver settings.
///
/// The non-renewable sector buys fossil fuel for `non_renewable_capital` at
/// every candidate price; the renewable sector uses `renewable_capital`.
///
/// # Errors
///
/// See [`EnergyMarket::clear`]; also `ModelError::Domain` for invalid capital.
pub fn clear_price(
    consumer: &dyn Consumer,
    renewable_capital: RenewableCapital,
    non_renewable_capital: f64,
    renewable: &TechnologyParameters,
    non_renewable: &TechnologyParameters,
    market: &MarketParameters,
) -> Result<MarketState> {
    let renewable = RenewableSector::with_capital(*renewable, renewable_capital)?;
    let non_renewable =
        NonRenewableSector::new(*non_renewable, non_renewable_capital, non_renewable_capital)?;
    EnergyMarket::default().clear(consumer, &[&renewable, &non_renewable], market, None)
}
