//! Renewable energy sector: capital is the only input and carries no
//! adjustment cost, so capital demand has a closed-form static optimum.

use serde::Serialize;

use super::types::{EnergySector, MarketParameters, SectorOutcome, TechnologyParameters};
use crate::error::{Result, domain, ensure_finite, ensure_non_negative, ensure_positive};

/// Renewable energy output `tfp * capital^alpha`.
///
/// # Errors
///
/// Returns `ModelError::Domain` if `capital` is negative or not finite.
pub fn output(capital: f64, technology: &TechnologyParameters) -> Result<f64> {
    let capital = ensure_non_negative("capital", capital)?;
    ensure_finite(
        "renewable output",
        technology.tfp() * capital.powf(technology.capital_share()),
    )
}

/// Per-unit payment received by renewable producers.
///
/// Tracks the market price one-for-one.
///
/// # Errors
///
/// Returns `ModelError::Domain` if `energy_price` is not positive.
pub fn subsidy(energy_price: f64) -> Result<f64> {
    ensure_positive("energy_price", energy_price)
}

/// Renewable revenue `subsidy(energy_price) * output`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for a negative capital or a non-positive price.
pub fn revenue(
    capital: f64,
    energy_price: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    ensure_finite(
        "renewable revenue",
        subsidy(energy_price)? * output(capital, technology)?,
    )
}

/// Capital rented at the gross interest rate.
///
/// # Errors
///
/// Returns `ModelError::Domain` for a negative capital or a non-positive rate.
pub fn total_costs(capital: f64, gross_interest_rate: f64) -> Result<f64> {
    let capital = ensure_non_negative("capital", capital)?;
    let rate = ensure_positive("gross_interest_rate", gross_interest_rate)?;
    ensure_finite("renewable total costs", rate * capital)
}

/// Renewable profits `revenue - total_costs`.
///
/// # Errors
///
/// Propagates the domain errors of [`revenue`] and [`total_costs`].
pub fn profits(
    capital: f64,
    energy_price: f64,
    gross_interest_rate: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    Ok(revenue(capital, energy_price, technology)? - total_costs(capital, gross_interest_rate)?)
}

/// Derivative of profits with respect to capital:
/// `alpha * tfp * subsidy * capital^(alpha - 1) - gross_interest_rate`.
///
/// Zero at [`capital_demand`].
///
/// # Errors
///
/// Returns `ModelError::Domain` if `capital` is not strictly positive or the
/// price/rate are invalid.
pub fn marginal_profit(
    capital: f64,
    energy_price: f64,
    gross_interest_rate: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let capital = ensure_positive("capital", capital)?;
    let rate = ensure_positive("gross_interest_rate", gross_interest_rate)?;
    let alpha = technology.capital_share();
    let marginal_revenue =
        alpha * technology.tfp() * subsidy(energy_price)? * capital.powf(alpha - 1.0);
    ensure_finite("renewable marginal profit", marginal_revenue - rate)
}

/// Static profit-maximizing capital stock
/// `(alpha * tfp * subsidy(energy_price) / gross_interest_rate)^(1 / (1 - alpha))`.
///
/// # Errors
///
/// Returns `ModelError::Domain` if the price or rate is not positive, or if
/// the result overflows (alpha very close to 1, rate close to 0). A demand
/// that underflows at very low prices is returned as `0.0`.
pub fn capital_demand(
    energy_price: f64,
    gross_interest_rate: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let rate = ensure_positive("gross_interest_rate", gross_interest_rate)?;
    let alpha = technology.capital_share();
    let base = alpha * technology.tfp() * subsidy(energy_price)? / rate;
    let demand = base.powf(1.0 / (1.0 - alpha));
    if demand.is_finite() {
        Ok(demand)
    } else {
        Err(domain("renewable capital demand", demand, "must be finite"))
    }
}

/// How the renewable sector's capital is determined when the market clears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "capital", rename_all = "snake_case")]
pub enum RenewableCapital {
    /// Capital is rented each period at its static optimum for the candidate price.
    Flexible,
    /// A fixed installed stock.
    Installed(f64),
}

/// Renewable producer as seen by the energy market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenewableSector {
    technology: TechnologyParameters,
    capital: RenewableCapital,
}

impl RenewableSector {
    /// Creates a renewable sector that rents its optimal capital at every price.
    pub fn flexible(technology: TechnologyParameters) -> Self {
        Self {
            technology,
            capital: RenewableCapital::Flexible,
        }
    }

    /// Creates a renewable sector with a fixed installed capital stock.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` if `capital` is negative or not finite.
    pub fn installed(technology: TechnologyParameters, capital: f64) -> Result<Self> {
        Ok(Self {
            technology,
            capital: RenewableCapital::Installed(ensure_non_negative("renewable capital", capital)?),
        })
    }

    /// Creates a renewable sector from a capital mode.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` for an invalid installed capital stock.
    pub fn with_capital(technology: TechnologyParameters, capital: RenewableCapital) -> Result<Self> {
        match capital {
            RenewableCapital::Flexible => Ok(Self::flexible(technology)),
            RenewableCapital::Installed(k) => Self::installed(technology, k),
        }
    }

    /// Capital in use at `energy_price`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` if the static optimum is ill-defined.
    pub fn capital_at(&self, energy_price: f64, market: &MarketParameters) -> Result<f64> {
        match self.capital {
            RenewableCapital::Flexible => {
                capital_demand(energy_price, market.gross_interest_rate(), &self.technology)
            }
            RenewableCapital::Installed(k) => Ok(k),
        }
    }

    /// Technology of this sector.
    pub fn technology(&self) -> &TechnologyParameters {
        &self.technology
    }
}

impl EnergySector for RenewableSector {
    fn supply(&self, energy_price: f64, market: &MarketParameters) -> Result<f64> {
        output(self.capital_at(energy_price, market)?, &self.technology)
    }

    fn outcome(&self, energy_price: f64, market: &MarketParameters) -> Result<SectorOutcome> {
        let capital = self.capital_at(energy_price, market)?;
        let rate = market.gross_interest_rate();
        let revenue = revenue(capital, energy_price, &self.technology)?;
        let costs = total_costs(capital, rate)?;
        Ok(SectorOutcome {
            output: output(capital, &self.technology)?,
            revenue,
            costs,
            profit: revenue - costs,
        })
    }

    fn sector_type(&self) -> &'static str {
        "Renewable"
    }
}
