//! API response and query types.
//!
//! Field names follow CSV schema v1 conventions for consistency across
//! export formats.

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;
use crate::sim::{PeriodResult, SteadyState, TrajectorySummary};

/// Combined state response: scenario, summary, and latest period.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub scenario: Scenario,
    pub summary: TrajectorySummary,
    /// `null` when renewables alone cover demand.
    pub steady_state: Option<SteadyState>,
    /// Most recent period; `null` when only the seeds exist.
    pub latest_period: Option<PeriodRecord>,
}

/// Single period record using CSV schema v1 field names.
///
/// Flattens the per-sector outcomes of `PeriodResult` into
/// `renewable_output`, `non_renewable_output`, `renewable_profit`, and
/// `non_renewable_profit`.
#[derive(Debug, Serialize)]
pub struct PeriodRecord {
    pub period: usize,
    pub previous_capital: f64,
    pub installed_capital: f64,
    pub capital: f64,
    pub investment: f64,
    pub energy_price: f64,
    pub fossil_fuel_price: f64,
    pub fossil_fuel: f64,
    pub renewable_capital: f64,
    pub renewable_output: f64,
    pub non_renewable_output: f64,
    pub renewable_profit: f64,
    pub non_renewable_profit: f64,
}

impl From<&PeriodResult> for PeriodRecord {
    fn from(r: &PeriodResult) -> Self {
        Self {
            period: r.period,
            previous_capital: r.previous_capital,
            installed_capital: r.installed_capital,
            capital: r.capital,
            investment: r.investment,
            energy_price: r.energy_price,
            fossil_fuel_price: r.fossil_fuel_price,
            fossil_fuel: r.fossil_fuel,
            renewable_capital: r.renewable_capital,
            renewable_output: r.renewable.output,
            non_renewable_output: r.non_renewable.output,
            renewable_profit: r.renewable.profit,
            non_renewable_profit: r.non_renewable.profit,
        }
    }
}

/// Optional range query parameters for the trajectory endpoint.
#[derive(Debug, Deserialize)]
pub struct TrajectoryQuery {
    /// First period (inclusive).
    pub from: Option<usize>,
    /// Last period (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sectors::SectorOutcome;

    #[test]
    fn period_record_flattens_sector_outcomes() {
        let result = PeriodResult {
            period: 7,
            previous_capital: 600.0,
            installed_capital: 605.0,
            capital: 610.0,
            investment: 5.0,
            energy_price: 0.99,
            fossil_fuel_price: 1.0,
            fossil_fuel: 320.0,
            renewable_capital: 1.02,
            renewable: SectorOutcome {
                output: 3.7,
                revenue: 3.66,
                costs: 1.11,
                profit: 2.55,
            },
            non_renewable: SectorOutcome {
                output: 996.3,
                revenue: 986.3,
                costs: 980.0,
                profit: 6.3,
            },
        };
        let record = PeriodRecord::from(&result);

        assert_eq!(record.period, 7);
        assert_eq!(record.installed_capital, 605.0);
        assert_eq!(record.investment, 5.0);
        assert_eq!(record.renewable_output, 3.7);
        assert_eq!(record.non_renewable_output, 996.3);
        assert_eq!(record.renewable_profit, 2.55);
        assert_eq!(record.non_renewable_profit, 6.3);
    }
}
