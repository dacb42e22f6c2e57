//! Non-renewable energy sector: Cobb-Douglas in capital and fossil fuel, with
//! convex costs of adjusting the capital stock.
//!
//! Fossil fuel is a flexible input chosen every period; capital moves only
//! through the partial-adjustment rule in [`future_capital_demand`].

use super::types::{EnergySector, MarketParameters, SectorOutcome, TechnologyParameters};
use crate::error::{Result, domain, ensure_finite, ensure_non_negative, ensure_positive};

/// Non-renewable energy output `tfp * capital^beta * fossil_fuel^(1 - beta)`.
///
/// # Errors
///
/// Returns `ModelError::Domain` if either input is negative or not finite.
pub fn output(capital: f64, fossil_fuel: f64, technology: &TechnologyParameters) -> Result<f64> {
    let capital = ensure_non_negative("capital", capital)?;
    let fossil_fuel = ensure_non_negative("fossil_fuel", fossil_fuel)?;
    let beta = technology.capital_share();
    ensure_finite(
        "non-renewable output",
        technology.tfp() * capital.powf(beta) * fossil_fuel.powf(1.0 - beta),
    )
}

/// Convex adjustment cost `(phi / 2) * (capital - previous_capital)^2`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for negative capital levels or a negative `phi`.
pub fn capital_adjustment_costs(capital: f64, previous_capital: f64, phi: f64) -> Result<f64> {
    let change = capital_change(capital, previous_capital)?;
    let phi = ensure_non_negative("adjustment_cost", phi)?;
    ensure_finite("capital adjustment costs", 0.5 * phi * change * change)
}

/// Marginal adjustment cost `phi * (capital - previous_capital)`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for negative capital levels or a negative `phi`.
pub fn marginal_adjustment_costs(capital: f64, previous_capital: f64, phi: f64) -> Result<f64> {
    let change = capital_change(capital, previous_capital)?;
    let phi = ensure_non_negative("adjustment_cost", phi)?;
    ensure_finite("marginal adjustment costs", phi * change)
}

fn capital_change(capital: f64, previous_capital: f64) -> Result<f64> {
    let capital = ensure_non_negative("capital", capital)?;
    let previous_capital = ensure_non_negative("previous_capital", previous_capital)?;
    Ok(capital - previous_capital)
}

/// Rental cost of capital plus adjustment costs.
///
/// # Errors
///
/// Returns `ModelError::Domain` for a non-positive rate or invalid capital levels.
pub fn total_cost_capital(
    capital: f64,
    previous_capital: f64,
    gross_interest_rate: f64,
    phi: f64,
) -> Result<f64> {
    let rate = ensure_positive("gross_interest_rate", gross_interest_rate)?;
    let adjustment = capital_adjustment_costs(capital, previous_capital, phi)?;
    ensure_finite("capital costs", rate * capital + adjustment)
}

/// Fossil-fuel purchases `fossil_fuel_price * fossil_fuel`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for a negative quantity or non-positive price.
pub fn total_cost_fossil_fuel(fossil_fuel: f64, fossil_fuel_price: f64) -> Result<f64> {
    let fossil_fuel = ensure_non_negative("fossil_fuel", fossil_fuel)?;
    let price = ensure_positive("fossil_fuel_price", fossil_fuel_price)?;
    ensure_finite("fossil fuel costs", price * fossil_fuel)
}

/// Capital costs plus fossil-fuel costs.
///
/// # Errors
///
/// Propagates the domain errors of the two cost components.
pub fn total_costs(
    capital: f64,
    previous_capital: f64,
    fossil_fuel: f64,
    market: &MarketParameters,
) -> Result<f64> {
    Ok(total_cost_capital(
        capital,
        previous_capital,
        market.gross_interest_rate(),
        market.adjustment_cost(),
    )? + total_cost_fossil_fuel(fossil_fuel, market.fossil_fuel_price())?)
}

/// Marginal cost of capital `gross_interest_rate + phi * (capital - previous_capital)`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for a non-positive rate or invalid capital levels.
pub fn marginal_cost_capital(
    capital: f64,
    previous_capital: f64,
    gross_interest_rate: f64,
    phi: f64,
) -> Result<f64> {
    let rate = ensure_positive("gross_interest_rate", gross_interest_rate)?;
    Ok(rate + marginal_adjustment_costs(capital, previous_capital, phi)?)
}

/// Revenue `energy_price * output`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for a non-positive price or invalid inputs.
pub fn revenue(
    capital: f64,
    fossil_fuel: f64,
    energy_price: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let price = ensure_positive("energy_price", energy_price)?;
    ensure_finite(
        "non-renewable revenue",
        price * output(capital, fossil_fuel, technology)?,
    )
}

/// Profits `revenue - total_costs`.
///
/// # Errors
///
/// Propagates the domain errors of [`revenue`] and [`total_costs`].
pub fn profits(
    capital: f64,
    previous_capital: f64,
    fossil_fuel: f64,
    energy_price: f64,
    technology: &TechnologyParameters,
    market: &MarketParameters,
) -> Result<f64> {
    Ok(revenue(capital, fossil_fuel, energy_price, technology)?
        - total_costs(capital, previous_capital, fossil_fuel, market)?)
}

/// Capital stock per unit of output.
///
/// # Errors
///
/// Returns `ModelError::Domain` if output is zero (no capital or no fuel).
pub fn capital_output_ratio(
    capital: f64,
    fossil_fuel: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let energy = output(capital, fossil_fuel, technology)?;
    if energy <= 0.0 {
        return Err(domain("non-renewable output", energy, "must be > 0"));
    }
    ensure_positive("capital-output ratio", capital / energy)
}

/// Physical marginal product of capital `beta / capital_output_ratio`.
///
/// # Errors
///
/// Propagates the domain errors of [`capital_output_ratio`].
pub fn marginal_product_capital(
    capital: f64,
    fossil_fuel: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let ratio = capital_output_ratio(capital, fossil_fuel, technology)?;
    ensure_finite(
        "marginal product of capital",
        technology.capital_share() / ratio,
    )
}

/// Revenue contributed by the marginal unit of capital, `energy_price * beta / capital_output_ratio`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for a non-positive price or zero output.
pub fn value_marginal_product_capital(
    capital: f64,
    fossil_fuel: f64,
    energy_price: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let price = ensure_positive("energy_price", energy_price)?;
    ensure_finite(
        "value marginal product of capital",
        price * marginal_product_capital(capital, fossil_fuel, technology)?,
    )
}

/// Value marginal product of capital less its marginal cost: the investment wedge.
///
/// # Errors
///
/// Propagates the domain errors of the two terms.
pub fn net_value_marginal_product_capital(
    capital: f64,
    previous_capital: f64,
    fossil_fuel: f64,
    energy_price: f64,
    technology: &TechnologyParameters,
    gross_interest_rate: f64,
    phi: f64,
) -> Result<f64> {
    Ok(
        value_marginal_product_capital(capital, fossil_fuel, energy_price, technology)?
            - marginal_cost_capital(capital, previous_capital, gross_interest_rate, phi)?,
    )
}

/// Next-period capital under the partial-adjustment rule
/// `capital + net_value_marginal_product_capital / (eta * phi)`.
///
/// # Errors
///
/// Returns `ModelError::Domain` if `eta * phi == 0`, if any input is invalid,
/// or if the result is not finite.
pub fn future_capital_demand(
    capital: f64,
    previous_capital: f64,
    fossil_fuel: f64,
    energy_price: f64,
    technology: &TechnologyParameters,
    market: &MarketParameters,
) -> Result<f64> {
    ensure_finite(
        "future capital demand",
        next_capital(
            capital,
            previous_capital,
            fossil_fuel,
            energy_price,
            technology,
            market,
        )?,
    )
}

/// Unchecked form of [`future_capital_demand`]: the result may be negative or
/// non-finite, which the simulator reports as divergence.
pub(crate) fn next_capital(
    capital: f64,
    previous_capital: f64,
    fossil_fuel: f64,
    energy_price: f64,
    technology: &TechnologyParameters,
    market: &MarketParameters,
) -> Result<f64> {
    let scale = market.investment_elasticity() * market.adjustment_cost();
    if scale == 0.0 {
        return Err(domain(
            "investment_elasticity * adjustment_cost",
            scale,
            "must be non-zero",
        ));
    }
    let wedge = net_value_marginal_product_capital(
        capital,
        previous_capital,
        fossil_fuel,
        energy_price,
        technology,
        market.gross_interest_rate(),
        market.adjustment_cost(),
    )?;
    Ok(capital + wedge / scale)
}

/// Fossil fuel demanded per unit of installed capital,
/// `(tfp * (1 - beta) * energy_price / fossil_fuel_price)^(1 / beta)`.
///
/// # Errors
///
/// Returns `ModelError::Domain` for non-positive prices or if the result
/// overflows. Underflow at very low energy prices yields `0.0`.
pub fn fossil_fuel_demand(
    energy_price: f64,
    fossil_fuel_price: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let price = ensure_positive("energy_price", energy_price)?;
    let fuel_price = ensure_positive("fossil_fuel_price", fossil_fuel_price)?;
    let beta = technology.capital_share();
    let demand = (technology.tfp() * (1.0 - beta) * price / fuel_price).powf(1.0 / beta);
    if demand.is_finite() {
        Ok(demand)
    } else {
        Err(domain("fossil fuel demand", demand, "must be finite"))
    }
}

/// Fossil fuel purchased by a firm with `capital` installed:
/// `capital * fossil_fuel_demand(...)`.
///
/// # Errors
///
/// Propagates the domain errors of [`fossil_fuel_demand`].
pub fn fossil_fuel_input(
    capital: f64,
    energy_price: f64,
    fossil_fuel_price: f64,
    technology: &TechnologyParameters,
) -> Result<f64> {
    let capital = ensure_non_negative("capital", capital)?;
    ensure_finite(
        "fossil fuel input",
        capital * fossil_fuel_demand(energy_price, fossil_fuel_price, technology)?,
    )
}

/// Non-renewable producer with an installed capital stock and its lag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonRenewableSector {
    technology: TechnologyParameters,
    capital: f64,
    previous_capital: f64,
}

impl NonRenewableSector {
    /// Creates the sector at `capital` installed this period and
    /// `previous_capital` installed the period before.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` if either capital level is negative or not finite.
    pub fn new(
        technology: TechnologyParameters,
        capital: f64,
        previous_capital: f64,
    ) -> Result<Self> {
        Ok(Self {
            technology,
            capital: ensure_non_negative("capital", capital)?,
            previous_capital: ensure_non_negative("previous_capital", previous_capital)?,
        })
    }

    /// Installed capital.
    pub fn capital(&self) -> f64 {
        self.capital
    }

    /// Fossil fuel bought at `energy_price`.
    ///
    /// # Errors
    ///
    /// Propagates the domain errors of [`fossil_fuel_input`].
    pub fn fossil_fuel(&self, energy_price: f64, market: &MarketParameters) -> Result<f64> {
        fossil_fuel_input(
            self.capital,
            energy_price,
            market.fossil_fuel_price(),
            &self.technology,
        )
    }
}

impl EnergySector for NonRenewableSector {
    fn supply(&self, energy_price: f64, market: &MarketParameters) -> Result<f64> {
        output(
            self.capital,
            self.fossil_fuel(energy_price, market)?,
            &self.technology,
        )
    }

    fn outcome(&self, energy_price: f64, market: &MarketParameters) -> Result<SectorOutcome> {
        let fuel = self.fossil_fuel(energy_price, market)?;
        let revenue = revenue(self.capital, fuel, energy_price, &self.technology)?;
        let costs = total_costs(self.capital, self.previous_capital, fuel, market)?;
        Ok(SectorOutcome {
            output: output(self.capital, fuel, &self.technology)?,
            revenue,
            costs,
            profit: revenue - costs,
        })
    }

    fn sector_type(&self) -> &'static str {
        "NonRenewable"
    }
}
