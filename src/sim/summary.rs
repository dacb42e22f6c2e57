//! Post-hoc summary statistics from a simulation run.

use std::fmt;

use serde::Serialize;

use super::engine::SimulationRun;
use super::steady_state::SteadyState;

/// Aggregate indicators derived from a complete simulation run.
///
/// Computed post-hoc from the run so the report always agrees with the
/// per-period records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySummary {
    /// Simulated periods, seeds excluded.
    pub periods: usize,
    pub initial_capital: f64,
    pub final_capital: f64,
    pub min_capital: f64,
    pub max_capital: f64,
    pub mean_energy_price: f64,
    pub final_energy_price: f64,
    /// Largest absolute one-period change in capital.
    pub max_abs_investment: f64,
    /// `final_capital - steady_state.capital`, when the steady state exists.
    pub steady_state_gap: Option<f64>,
    pub cumulative_renewable_profit: f64,
    pub cumulative_non_renewable_profit: f64,
}

impl TrajectorySummary {
    /// Computes all indicators from a finished run.
    ///
    /// # Arguments
    ///
    /// * `run` - Completed simulation
    /// * `steady_state` - Long-run equilibrium, if one exists
    pub fn from_run(run: &SimulationRun, steady_state: Option<&SteadyState>) -> Self {
        let levels = run.trajectory.as_slice();
        // a trajectory always holds its seeds
        let initial_capital = levels[0];
        let final_capital = run.trajectory.last();

        let mut min_capital = f64::INFINITY;
        let mut max_capital = f64::NEG_INFINITY;
        for &k in levels {
            min_capital = min_capital.min(k);
            max_capital = max_capital.max(k);
        }

        let mut price_sum = 0.0;
        let mut max_abs_investment = 0.0_f64;
        let mut renewable_profit = 0.0;
        let mut non_renewable_profit = 0.0;
        for r in &run.periods {
            price_sum += r.energy_price;
            max_abs_investment = max_abs_investment.max(r.investment.abs());
            renewable_profit += r.renewable.profit;
            non_renewable_profit += r.non_renewable.profit;
        }

        let (mean_energy_price, final_energy_price) = match run.latest() {
            Some(last) => (price_sum / run.periods.len() as f64, last.energy_price),
            None => (0.0, 0.0),
        };

        Self {
            periods: run.periods.len(),
            initial_capital,
            final_capital,
            min_capital,
            max_capital,
            mean_energy_price,
            final_energy_price,
            max_abs_investment,
            steady_state_gap: steady_state.map(|ss| final_capital - ss.capital),
            cumulative_renewable_profit: renewable_profit,
            cumulative_non_renewable_profit: non_renewable_profit,
        }
    }
}

impl fmt::Display for TrajectorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Trajectory Summary ---")?;
        writeln!(f, "Periods simulated:     {}", self.periods)?;
        writeln!(
            f,
            "Capital:               {:.3} -> {:.3} (min {:.3}, max {:.3})",
            self.initial_capital, self.final_capital, self.min_capital, self.max_capital
        )?;
        writeln!(f, "Largest investment:    {:.3}", self.max_abs_investment)?;
        writeln!(
            f,
            "Energy price:          {:.6} mean, {:.6} final",
            self.mean_energy_price, self.final_energy_price
        )?;
        match self.steady_state_gap {
            Some(gap) => writeln!(f, "Gap to steady state:   {gap:.3}")?,
            None => writeln!(f, "Gap to steady state:   n/a")?,
        }
        write!(
            f,
            "Cumulative profits:    {:.3} renewable, {:.3} non-renewable",
            self.cumulative_renewable_profit, self.cumulative_non_renewable_profit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sectors::SectorOutcome;
    use crate::sim::engine::{CapitalTrajectory, PeriodResult};

    fn outcome(profit: f64) -> SectorOutcome {
        SectorOutcome {
            output: 1.0,
            revenue: profit,
            costs: 0.0,
            profit,
        }
    }

    fn make_run(levels: &[f64], prices: &[f64]) -> SimulationRun {
        let mut trajectory = CapitalTrajectory::from_seeds([levels[0], levels[1]]).unwrap();
        let mut periods = Vec::new();
        for (i, (&k, &p)) in levels[2..].iter().zip(prices).enumerate() {
            let period = i + 2;
            periods.push(PeriodResult {
                period,
                previous_capital: levels[period - 2],
                installed_capital: levels[period - 1],
                capital: k,
                investment: k - levels[period - 1],
                energy_price: p,
                fossil_fuel_price: 1.0,
                fossil_fuel: 1.0,
                renewable_capital: 1.0,
                renewable: outcome(1.0),
                non_renewable: outcome(2.0),
            });
        }
        for r in &periods {
            trajectory.push(r.capital);
        }
        SimulationRun {
            trajectory,
            periods,
        }
    }

    #[test]
    fn capital_extremes_and_investment() {
        let run = make_run(&[10.0, 12.0, 9.0, 15.0], &[1.0, 3.0]);
        let s = TrajectorySummary::from_run(&run, None);
        assert_eq!(s.periods, 2);
        assert_eq!(s.initial_capital, 10.0);
        assert_eq!(s.final_capital, 15.0);
        assert_eq!(s.min_capital, 9.0);
        assert_eq!(s.max_capital, 15.0);
        assert_eq!(s.max_abs_investment, 6.0);
        assert_eq!(s.mean_energy_price, 2.0);
        assert_eq!(s.final_energy_price, 3.0);
        assert_eq!(s.steady_state_gap, None);
    }

    #[test]
    fn cumulative_profits() {
        let run = make_run(&[10.0, 10.0, 10.0, 10.0, 10.0], &[1.0, 1.0, 1.0]);
        let s = TrajectorySummary::from_run(&run, None);
        assert_eq!(s.cumulative_renewable_profit, 3.0);
        assert_eq!(s.cumulative_non_renewable_profit, 6.0);
    }

    #[test]
    fn gap_to_steady_state() {
        let run = make_run(&[10.0, 12.0, 11.0], &[1.0]);
        let ss = SteadyState {
            energy_price: 1.0,
            capital: 10.5,
            fossil_fuel: 1.0,
            renewable_capital: 1.0,
        };
        let s = TrajectorySummary::from_run(&run, Some(&ss));
        assert_eq!(s.steady_state_gap, Some(0.5));
        assert!(s.to_string().contains("Gap to steady state:   0.500"));
    }

    #[test]
    fn seeds_only() {
        let run = make_run(&[10.0, 12.0], &[]);
        let s = TrajectorySummary::from_run(&run, None);
        assert_eq!(s.periods, 0);
        assert_eq!(s.mean_energy_price, 0.0);
        assert_eq!(s.max_capital, 12.0);
        assert!(s.to_string().starts_with("--- Trajectory Summary ---"));
    }
}
