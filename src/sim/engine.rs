//! Capital-dynamics simulator that clears the market and moves non-renewable
//! capital one period at a time.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::clock::PeriodClock;
use crate::consumer::Consumer;
use crate::error::{ModelError, Result, domain, ensure_positive};
use crate::market::{EnergyMarket, SolverOptions};
use crate::sectors::non_renewable::next_capital;
use crate::sectors::{
    EnergySector, ModelParameters, NonRenewableSector, RenewableCapital, RenewableSector,
    SectorOutcome,
};

/// Number of supplied capital levels the second-order recursion starts from.
pub const SEED_PERIODS: usize = 2;

/// Append-only sequence of non-renewable capital levels, one per period.
///
/// The first [`SEED_PERIODS`] entries are the supplied seeds. Every entry is
/// finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CapitalTrajectory {
    levels: Vec<f64>,
}

impl CapitalTrajectory {
    /// Starts a trajectory from two seed levels `[capital[0], capital[1]]`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` if a seed is not a finite positive number.
    pub fn from_seeds(seeds: [f64; SEED_PERIODS]) -> Result<Self> {
        let mut levels = Vec::with_capacity(SEED_PERIODS);
        for seed in seeds {
            levels.push(ensure_positive("initial_capital", seed)?);
        }
        Ok(Self { levels })
    }

    pub(crate) fn push(&mut self, capital: f64) {
        self.levels.push(capital);
    }

    /// Capital levels in period order.
    pub fn as_slice(&self) -> &[f64] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Capital in `period`, if it has been simulated.
    pub fn get(&self, period: usize) -> Option<f64> {
        self.levels.get(period).copied()
    }

    /// Most recent capital level.
    pub fn last(&self) -> f64 {
        self.levels[self.levels.len() - 1]
    }

    /// Capital level before the most recent one.
    pub fn second_last(&self) -> f64 {
        self.levels[self.levels.len() - 2]
    }
}

/// Everything observed in one simulated period.
///
/// `previous_capital` and `installed_capital` are the two lags the period
/// starts from; `capital` is the level chosen for the next period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodResult {
    pub period: usize,
    /// Capital two periods back, `capital[t-2]`.
    pub previous_capital: f64,
    /// Capital producing this period, `capital[t-1]`.
    pub installed_capital: f64,
    /// Newly chosen capital, `capital[t]`.
    pub capital: f64,
    /// `capital - installed_capital`.
    pub investment: f64,
    pub energy_price: f64,
    pub fossil_fuel_price: f64,
    /// Fossil fuel bought by the non-renewable sector.
    pub fossil_fuel: f64,
    /// Capital used by the renewable sector at the cleared price.
    pub renewable_capital: f64,
    pub renewable: SectorOutcome,
    pub non_renewable: SectorOutcome,
}

impl fmt::Display for PeriodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} | K={:>10.3} -> {:>10.3} (inv={:>8.3}) | p={:.6} | \
             fuel={:.3} | E_R={:.3} E_NR={:.3} | pi_R={:.3} pi_NR={:.3}",
            self.period,
            self.installed_capital,
            self.capital,
            self.investment,
            self.energy_price,
            self.fossil_fuel,
            self.renewable.output,
            self.non_renewable.output,
            self.renewable.profit,
            self.non_renewable.profit,
        )
    }
}

/// Output of a complete simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub trajectory: CapitalTrajectory,
    /// One record per simulated period, seeds excluded.
    pub periods: Vec<PeriodResult>,
}

impl SimulationRun {
    /// Most recent period, if any was simulated.
    pub fn latest(&self) -> Option<&PeriodResult> {
        self.periods.last()
    }
}

/// A fossil sector without capital produces nothing and has no marginal
/// product, so the recursion cannot continue from a zero level.
fn admissible_capital(period: usize, capital: f64) -> Result<f64> {
    if capital.is_finite() && capital > 0.0 {
        Ok(capital)
    } else {
        warn!(period, capital, "capital trajectory diverged");
        Err(ModelError::Divergence { period, capital })
    }
}

/// Simulator owning the consumer, parameters, and market settings.
///
/// Generic over `C: Consumer` for static dispatch.
#[derive(Debug, Clone)]
pub struct Simulator<C: Consumer> {
    consumer: C,
    parameters: ModelParameters,
    renewable: RenewableSector,
    market: EnergyMarket,
}

impl<C: Consumer> Simulator<C> {
    /// Creates a simulator with flexible renewable capital and default
    /// solver settings.
    pub fn new(consumer: C, parameters: ModelParameters) -> Self {
        Self {
            consumer,
            parameters,
            renewable: RenewableSector::flexible(parameters.renewable),
            market: EnergyMarket::default(),
        }
    }

    /// Replaces how renewable capital is determined.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` for an invalid installed capital stock.
    pub fn with_renewable_capital(mut self, capital: RenewableCapital) -> Result<Self> {
        self.renewable = RenewableSector::with_capital(self.parameters.renewable, capital)?;
        Ok(self)
    }

    /// Replaces the market solver settings.
    pub fn with_solver(mut self, options: SolverOptions) -> Self {
        self.market = EnergyMarket::new(options);
        self
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn renewable(&self) -> &RenewableSector {
        &self.renewable
    }

    /// Simulates the period following the end of `trajectory`.
    ///
    /// Clears the market with the installed capital, buys fossil fuel at the
    /// cleared price, and applies the partial-adjustment rule.
    ///
    /// # Arguments
    ///
    /// * `trajectory` - Capital history; must hold at least two levels
    /// * `seed` - Starting price for the market's bracket search
    ///
    /// # Errors
    ///
    /// * `ModelError::Divergence` - the new capital level is not finite and positive
    /// * any error raised while clearing the market or evaluating the sectors
    pub fn step(&self, trajectory: &CapitalTrajectory, seed: Option<f64>) -> Result<PeriodResult> {
        let period = trajectory.len();
        if period < SEED_PERIODS {
            return Err(domain(
                "trajectory length",
                period as f64,
                "must hold both seed periods",
            ));
        }
        let installed = trajectory.last();
        let previous = trajectory.second_last();
        let params = &self.parameters;

        // 1. Clear the market with this period's capital
        let non_renewable = NonRenewableSector::new(params.non_renewable, installed, previous)?;
        let state = self.market.clear(
            &self.consumer,
            &[&self.renewable, &non_renewable],
            &params.market,
            seed,
        )?;
        let price = state.energy_price;

        // 2. Fossil fuel at the cleared price
        let fossil_fuel = non_renewable.fossil_fuel(price, &params.market)?;

        // 3. Partial adjustment towards the value marginal product
        let capital = next_capital(
            installed,
            previous,
            fossil_fuel,
            price,
            &params.non_renewable,
            &params.market,
        )?;
        let capital = admissible_capital(period, capital)?;

        let result = PeriodResult {
            period,
            previous_capital: previous,
            installed_capital: installed,
            capital,
            investment: capital - installed,
            energy_price: price,
            fossil_fuel_price: state.fossil_fuel_price,
            fossil_fuel,
            renewable_capital: self.renewable.capital_at(price, &params.market)?,
            renewable: self.renewable.outcome(price, &params.market)?,
            non_renewable: non_renewable.outcome(price, &params.market)?,
        };
        debug!(
            period,
            energy_price = price,
            fossil_fuel,
            capital,
            "period simulated"
        );
        Ok(result)
    }

    /// Simulates periods `2..horizon` starting from two seed capital levels.
    ///
    /// # Arguments
    ///
    /// * `horizon` - Total number of periods including the two seeds (>= 2)
    /// * `initial_capital` - `[capital[0], capital[1]]`
    ///
    /// # Errors
    ///
    /// `ModelError::Domain` for `horizon < 2` or invalid seeds; otherwise the
    /// first error raised by [`Simulator::step`]. Nothing is retried.
    pub fn run(&self, horizon: usize, initial_capital: [f64; SEED_PERIODS]) -> Result<SimulationRun> {
        if horizon < SEED_PERIODS {
            return Err(domain("horizon", horizon as f64, "must be >= 2"));
        }
        let mut trajectory = CapitalTrajectory::from_seeds(initial_capital)?;
        let mut clock = PeriodClock::new(SEED_PERIODS, horizon);
        let mut periods = Vec::with_capacity(clock.remaining());
        info!(
            horizon,
            initial_capital = ?initial_capital,
            renewable = self.renewable.sector_type(),
            "simulation started"
        );

        let mut seed = None;
        while let Some(period) = clock.tick() {
            debug_assert_eq!(period, trajectory.len());
            let result = self.step(&trajectory, seed)?;
            trajectory.push(result.capital);
            seed = Some(result.energy_price);
            periods.push(result);
        }

        info!(
            periods = periods.len(),
            final_capital = trajectory.last(),
            "simulation finished"
        );
        Ok(SimulationRun {
            trajectory,
            periods,
        })
    }
}

/// Simulates the capital trajectory with flexible renewable capital and
/// default solver settings.
///
/// # Errors
///
/// See [`Simulator::run`].
pub fn run<C: Consumer>(
    horizon: usize,
    initial_capital: [f64; SEED_PERIODS],
    consumer: C,
    parameters: &ModelParameters,
) -> Result<CapitalTrajectory> {
    Ok(Simulator::new(consumer, *parameters)
        .run(horizon, initial_capital)?
        .trajectory)
}
