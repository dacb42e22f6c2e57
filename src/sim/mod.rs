/// Period counter driving the simulation loop.
pub mod clock;
pub mod engine;
/// Long-run equilibrium of the capital recursion.
pub mod steady_state;
pub mod summary;

pub use engine::{CapitalTrajectory, PeriodResult, SimulationRun, Simulator, run};
pub use steady_state::{SteadyState, steady_state};
pub use summary::TrajectorySummary;
