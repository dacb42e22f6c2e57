//! Shared parameter records, derived outcomes, and the sector capability trait.

use serde::Serialize;

use crate::error::{Result, domain, ensure_non_negative, ensure_open_unit, ensure_positive};

/// Cobb-Douglas technology of one sector.
///
/// `capital_share` is the capital exponent: alpha for the renewable sector,
/// beta for the non-renewable sector. Both fields are validated at
/// construction, so every sector function can rely on them.
///
/// # Examples
///
/// ```
/// use energy_transition::sectors::TechnologyParameters;
///
/// let tech = TechnologyParameters::new(0.3, 3.692).unwrap();
/// assert_eq!(tech.capital_share(), 0.3);
/// assert!(TechnologyParameters::new(1.0, 3.692).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnologyParameters {
    capital_share: f64,
    tfp: f64,
}

impl TechnologyParameters {
    /// Creates a validated technology.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` if `capital_share` is outside `(0, 1)` or
    /// `tfp` is not a finite positive number.
    pub fn new(capital_share: f64, tfp: f64) -> Result<Self> {
        Ok(Self {
            capital_share: ensure_open_unit("capital_share", capital_share)?,
            tfp: ensure_positive("tfp", tfp)?,
        })
    }

    /// Capital exponent in `(0, 1)`.
    pub fn capital_share(&self) -> f64 {
        self.capital_share
    }

    /// Total factor productivity (> 0).
    pub fn tfp(&self) -> f64 {
        self.tfp
    }
}

/// Market-wide prices and the non-renewable investment technology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketParameters {
    gross_interest_rate: f64,
    fossil_fuel_price: f64,
    adjustment_cost: f64,
    investment_elasticity: f64,
}

impl MarketParameters {
    /// Creates validated market parameters.
    ///
    /// # Arguments
    ///
    /// * `gross_interest_rate` - Rental price of capital (must be > 1)
    /// * `fossil_fuel_price` - Price of one unit of fossil fuel (must be > 0)
    /// * `adjustment_cost` - Convex adjustment cost coefficient phi (must be >= 0)
    /// * `investment_elasticity` - Investment elasticity eta (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` naming the first invalid field.
    pub fn new(
        gross_interest_rate: f64,
        fossil_fuel_price: f64,
        adjustment_cost: f64,
        investment_elasticity: f64,
    ) -> Result<Self> {
        if !(gross_interest_rate.is_finite() && gross_interest_rate > 1.0) {
            return Err(domain(
                "gross_interest_rate",
                gross_interest_rate,
                "must be finite and > 1",
            ));
        }
        Ok(Self {
            gross_interest_rate,
            fossil_fuel_price: ensure_positive("fossil_fuel_price", fossil_fuel_price)?,
            adjustment_cost: ensure_non_negative("adjustment_cost", adjustment_cost)?,
            investment_elasticity: ensure_positive("investment_elasticity", investment_elasticity)?,
        })
    }

    /// Gross rental rate of capital.
    pub fn gross_interest_rate(&self) -> f64 {
        self.gross_interest_rate
    }

    /// Exogenous fossil-fuel price.
    pub fn fossil_fuel_price(&self) -> f64 {
        self.fossil_fuel_price
    }

    /// Adjustment cost coefficient phi.
    pub fn adjustment_cost(&self) -> f64 {
        self.adjustment_cost
    }

    /// Investment elasticity eta.
    pub fn investment_elasticity(&self) -> f64 {
        self.investment_elasticity
    }

    /// Returns a copy with a different adjustment cost coefficient.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` if `adjustment_cost` is negative or not finite.
    pub fn with_adjustment_cost(self, adjustment_cost: f64) -> Result<Self> {
        Ok(Self {
            adjustment_cost: ensure_non_negative("adjustment_cost", adjustment_cost)?,
            ..self
        })
    }
}

/// Complete configuration bundle for one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParameters {
    /// Renewable technology (alpha, tfp).
    pub renewable: TechnologyParameters,
    /// Non-renewable technology (beta, tfp).
    pub non_renewable: TechnologyParameters,
    /// Prices and investment technology.
    pub market: MarketParameters,
}

/// Output, revenue, costs, and profit of one sector at given prices.
///
/// Derived on demand; never carried from one period to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectorOutcome {
    /// Energy produced.
    pub output: f64,
    /// Revenue from selling `output`.
    pub revenue: f64,
    /// Total production costs.
    pub costs: f64,
    /// `revenue - costs`.
    pub profit: f64,
}

/// Capability shared by the energy producers the market clears against.
///
/// Implementors hold their own quantities (installed capital, lags); the
/// market supplies a candidate energy price and the market parameters.
pub trait EnergySector {
    /// Energy supplied at `energy_price` with the sector's variable factor
    /// chosen optimally.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` for invalid prices or quantities.
    fn supply(&self, energy_price: f64, market: &MarketParameters) -> Result<f64>;

    /// Full outcome at `energy_price`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` for invalid prices or quantities.
    fn outcome(&self, energy_price: f64, market: &MarketParameters) -> Result<SectorOutcome>;

    /// Returns a human-readable sector name.
    fn sector_type(&self) -> &'static str;
}
