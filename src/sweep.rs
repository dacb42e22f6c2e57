//! Parameter sweeps over technology shares and adjustment costs.
//!
//! Every point is an independent, side-effect free simulation; a failing
//! point is reported next to the others rather than aborting the sweep.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ModelError, Result};
use crate::scenario::Scenario;
use crate::sectors::TechnologyParameters;
use crate::sim::TrajectorySummary;

/// One combination of swept parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Renewable capital share.
    pub alpha: f64,
    /// Non-renewable capital share.
    pub beta: f64,
    /// Adjustment cost coefficient.
    pub phi: f64,
}

/// Cartesian grid of swept values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub renewable_shares: Vec<f64>,
    pub non_renewable_shares: Vec<f64>,
    pub adjustment_costs: Vec<f64>,
}

impl SweepGrid {
    /// All grid points, renewable share varying slowest.
    pub fn points(&self) -> Vec<SweepPoint> {
        let mut points = Vec::with_capacity(
            self.renewable_shares.len()
                * self.non_renewable_shares.len()
                * self.adjustment_costs.len(),
        );
        for &alpha in &self.renewable_shares {
            for &beta in &self.non_renewable_shares {
                for &phi in &self.adjustment_costs {
                    points.push(SweepPoint { alpha, beta, phi });
                }
            }
        }
        points
    }
}

/// Result of simulating one sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub point: SweepPoint,
    pub result: std::result::Result<TrajectorySummary, ModelError>,
}

/// Standard log-normal draw via the Box-Muller transform.
fn lognormal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z.exp()
}

/// Draws `count` random points from a seeded generator.
///
/// Capital shares are uniform on `[0.05, 0.95)`; the adjustment cost is
/// standard log-normal. The same seed always yields the same points.
pub fn sample_points(count: usize, seed: u64) -> Vec<SweepPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| SweepPoint {
            alpha: rng.random_range(0.05..0.95),
            beta: rng.random_range(0.05..0.95),
            phi: lognormal(&mut rng),
        })
        .collect()
}

fn apply(base: &Scenario, point: &SweepPoint) -> Result<Scenario> {
    let mut scenario = *base;
    let params = &mut scenario.parameters;
    params.renewable = TechnologyParameters::new(point.alpha, params.renewable.tfp())?;
    params.non_renewable = TechnologyParameters::new(point.beta, params.non_renewable.tfp())?;
    params.market = params.market.with_adjustment_cost(point.phi)?;
    Ok(scenario)
}

/// Simulates `base` once per point, replacing its shares and adjustment cost.
pub fn run_sweep(base: &Scenario, points: &[SweepPoint]) -> Vec<SweepOutcome> {
    info!(points = points.len(), horizon = base.horizon, "sweep started");
    let outcomes: Vec<SweepOutcome> = points
        .iter()
        .map(|point| {
            let result = apply(base, point)
                .and_then(|scenario| scenario.run())
                .map(|out| out.summary);
            if let Err(e) = &result {
                debug!(?point, error = %e, "sweep point failed");
            }
            SweepOutcome {
                point: *point,
                result,
            }
        })
        .collect();
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(failed, "sweep finished");
    outcomes
}
