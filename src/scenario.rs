//! Validated inputs of one simulation run and the helpers that execute it.

use serde::Serialize;

use crate::consumer::InelasticConsumer;
use crate::error::{ModelError, Result};
use crate::market::SolverOptions;
use crate::sectors::{ModelParameters, RenewableCapital};
use crate::sim::engine::SEED_PERIODS;
use crate::sim::{SimulationRun, Simulator, SteadyState, TrajectorySummary, steady_state};

/// Domain-level scenario: every field has already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub consumer: InelasticConsumer,
    pub parameters: ModelParameters,
    pub renewable_capital: RenewableCapital,
    pub solver: SolverOptions,
    /// Total periods including the seeds.
    pub horizon: usize,
    pub initial_capital: [f64; SEED_PERIODS],
}

/// Everything produced by running a scenario once.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    pub run: SimulationRun,
    pub steady_state: Option<SteadyState>,
    pub summary: TrajectorySummary,
}

impl Scenario {
    /// Builds the simulator for this scenario.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` for an invalid installed renewable stock.
    pub fn simulator(&self) -> Result<Simulator<InelasticConsumer>> {
        Ok(Simulator::new(self.consumer, self.parameters)
            .with_renewable_capital(self.renewable_capital)?
            .with_solver(self.solver))
    }

    /// Long-run equilibrium, or `None` when renewables alone cover demand.
    ///
    /// # Errors
    ///
    /// Propagates domain errors other than a missing equilibrium.
    pub fn steady_state(&self) -> Result<Option<SteadyState>> {
        match steady_state(&self.consumer, &self.parameters, self.renewable_capital) {
            Ok(ss) => Ok(Some(ss)),
            Err(ModelError::NoEquilibrium { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Runs the scenario over its horizon and summarises the trajectory.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by the simulator.
    pub fn run(&self) -> Result<ScenarioRun> {
        let run = self.simulator()?.run(self.horizon, self.initial_capital)?;
        let steady_state = self.steady_state()?;
        let summary = TrajectorySummary::from_run(&run, steady_state.as_ref());
        Ok(ScenarioRun {
            run,
            steady_state,
            summary,
        })
    }
}
