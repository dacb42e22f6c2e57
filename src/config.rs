//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::consumer::InelasticConsumer;
use crate::market::SolverOptions;
use crate::scenario::Scenario;
use crate::sectors::{MarketParameters, ModelParameters, RenewableCapital, TechnologyParameters};
use crate::sweep::{SweepGrid, SweepPoint, sample_points};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon and seed capital levels.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Energy demand.
    #[serde(default)]
    pub consumer: ConsumerConfig,
    /// Renewable technology and capital mode.
    #[serde(default)]
    pub renewable: RenewableConfig,
    /// Non-renewable technology.
    #[serde(default)]
    pub non_renewable: NonRenewableConfig,
    /// Prices and investment technology.
    #[serde(default)]
    pub market: MarketConfig,
    /// Root-finder settings.
    #[serde(default)]
    pub solver: SolverOptions,
    /// Parameter sweep run by `--sweep`.
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Horizon and seed capital levels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Total number of periods including the two seeds (must be >= 2).
    pub horizon: usize,
    /// Non-renewable capital in periods 0 and 1.
    pub initial_capital: [f64; 2],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon: 50,
            initial_capital: [600.0, 600.0],
        }
    }
}

/// Energy demand.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsumerConfig {
    /// Inelastic quantity demanded each period.
    pub demand: f64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self { demand: 1000.0 }
    }
}

/// Renewable technology and capital mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenewableConfig {
    /// Capital share alpha, in (0, 1).
    pub capital_share: f64,
    /// Total factor productivity.
    pub tfp: f64,
    /// Fixed installed capital; rented at the static optimum when absent.
    pub installed_capital: Option<f64>,
}

impl Default for RenewableConfig {
    fn default() -> Self {
        Self {
            capital_share: 0.3,
            tfp: 3.692,
            installed_capital: None,
        }
    }
}

/// Non-renewable technology.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NonRenewableConfig {
    /// Capital share beta, in (0, 1).
    pub capital_share: f64,
    /// Total factor productivity.
    pub tfp: f64,
}

impl Default for NonRenewableConfig {
    fn default() -> Self {
        Self {
            capital_share: 0.67,
            tfp: 2.0,
        }
    }
}

/// Prices and investment technology.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    pub gross_interest_rate: f64,
    pub fossil_fuel_price: f64,
    /// Convex adjustment cost coefficient phi.
    pub adjustment_cost: f64,
    /// Investment elasticity eta.
    pub investment_elasticity: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            gross_interest_rate: 1.09,
            fossil_fuel_price: 1.0,
            adjustment_cost: 0.2,
            investment_elasticity: 0.9,
        }
    }
}

/// Parameter sweep settings.
///
/// With `samples > 0` the points are drawn at random from `seed`; otherwise
/// the cartesian grid of the three lists is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub renewable_shares: Vec<f64>,
    pub non_renewable_shares: Vec<f64>,
    pub adjustment_costs: Vec<f64>,
    pub samples: usize,
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            renewable_shares: vec![0.2, 0.3, 0.4],
            non_renewable_shares: vec![0.6, 0.67],
            adjustment_costs: vec![0.2, 1.0],
            samples: 0,
            seed: 42,
        }
    }
}

impl SweepConfig {
    /// Points to simulate.
    pub fn points(&self) -> Vec<SweepPoint> {
        if self.samples > 0 {
            sample_points(self.samples, self.seed)
        } else {
            SweepGrid {
                renewable_shares: self.renewable_shares.clone(),
                non_renewable_shares: self.non_renewable_shares.clone(),
                adjustment_costs: self.adjustment_costs.clone(),
            }
            .points()
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"market.gross_interest_rate"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

fn require(errors: &mut Vec<ConfigError>, ok: bool, field: &str, message: &str) {
    if !ok {
        errors.push(ConfigError {
            field: field.into(),
            message: message.into(),
        });
    }
}

fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

fn open_unit(x: f64) -> bool {
    x > 0.0 && x < 1.0
}

impl ScenarioConfig {
    /// Returns the baseline scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the rigid-capital preset: adjustment costs so high that the
    /// non-renewable capital stock barely moves.
    pub fn rigid_capital() -> Self {
        Self {
            market: MarketConfig {
                adjustment_cost: 1e6,
                ..MarketConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the installed-renewables preset: a fixed renewable capital
    /// stock instead of one rented at the static optimum.
    pub fn installed_renewables() -> Self {
        Self {
            renewable: RenewableConfig {
                installed_capital: Some(50.0),
                ..RenewableConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "rigid_capital", "installed_renewables"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "rigid_capital" => Ok(Self::rigid_capital()),
            "installed_renewables" => Ok(Self::installed_renewables()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let e = &mut errors;

        let s = &self.simulation;
        require(e, s.horizon >= 2, "simulation.horizon", "must be >= 2");
        require(
            e,
            s.initial_capital.iter().all(|&k| positive(k)),
            "simulation.initial_capital",
            "must be finite and > 0",
        );

        require(
            e,
            positive(self.consumer.demand),
            "consumer.demand",
            "must be finite and > 0",
        );

        let r = &self.renewable;
        require(
            e,
            open_unit(r.capital_share),
            "renewable.capital_share",
            "must be in (0, 1)",
        );
        require(e, positive(r.tfp), "renewable.tfp", "must be finite and > 0");
        if let Some(k) = r.installed_capital {
            require(
                e,
                non_negative(k),
                "renewable.installed_capital",
                "must be finite and >= 0",
            );
        }

        let nr = &self.non_renewable;
        require(
            e,
            open_unit(nr.capital_share),
            "non_renewable.capital_share",
            "must be in (0, 1)",
        );
        require(
            e,
            positive(nr.tfp),
            "non_renewable.tfp",
            "must be finite and > 0",
        );

        let m = &self.market;
        require(
            e,
            m.gross_interest_rate.is_finite() && m.gross_interest_rate > 1.0,
            "market.gross_interest_rate",
            "must be finite and > 1",
        );
        require(
            e,
            positive(m.fossil_fuel_price),
            "market.fossil_fuel_price",
            "must be finite and > 0",
        );
        require(
            e,
            positive(m.adjustment_cost),
            "market.adjustment_cost",
            "must be finite and > 0",
        );
        require(
            e,
            positive(m.investment_elasticity),
            "market.investment_elasticity",
            "must be finite and > 0",
        );

        let sol = &self.solver;
        require(
            e,
            positive(sol.initial_price),
            "solver.initial_price",
            "must be finite and > 0",
        );
        require(
            e,
            sol.bracket_growth.is_finite() && sol.bracket_growth > 1.0,
            "solver.bracket_growth",
            "must be finite and > 1",
        );
        require(
            e,
            positive(sol.tolerance),
            "solver.tolerance",
            "must be finite and > 0",
        );
        require(
            e,
            non_negative(sol.price_tolerance),
            "solver.price_tolerance",
            "must be finite and >= 0",
        );
        require(
            e,
            sol.max_iterations > 0,
            "solver.max_iterations",
            "must be > 0",
        );

        let sw = &self.sweep;
        require(
            e,
            sw.renewable_shares.iter().all(|&x| open_unit(x)),
            "sweep.renewable_shares",
            "every value must be in (0, 1)",
        );
        require(
            e,
            sw.non_renewable_shares.iter().all(|&x| open_unit(x)),
            "sweep.non_renewable_shares",
            "every value must be in (0, 1)",
        );
        require(
            e,
            sw.adjustment_costs.iter().all(|&x| positive(x)),
            "sweep.adjustment_costs",
            "every value must be finite and > 0",
        );

        errors
    }

    /// Validates the configuration and converts it into domain types.
    ///
    /// # Errors
    ///
    /// Returns every validation error, or a single error if a domain
    /// constructor still rejects a value.
    pub fn build(&self) -> Result<Scenario, Vec<ConfigError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        self.to_scenario().map_err(|e| {
            vec![ConfigError {
                field: "scenario".to_string(),
                message: e.to_string(),
            }]
        })
    }

    fn to_scenario(&self) -> crate::error::Result<Scenario> {
        let m = &self.market;
        Ok(Scenario {
            consumer: InelasticConsumer::new(self.consumer.demand)?,
            parameters: ModelParameters {
                renewable: TechnologyParameters::new(
                    self.renewable.capital_share,
                    self.renewable.tfp,
                )?,
                non_renewable: TechnologyParameters::new(
                    self.non_renewable.capital_share,
                    self.non_renewable.tfp,
                )?,
                market: MarketParameters::new(
                    m.gross_interest_rate,
                    m.fossil_fuel_price,
                    m.adjustment_cost,
                    m.investment_elasticity,
                )?,
            },
            renewable_capital: match self.renewable.installed_capital {
                Some(k) => RenewableCapital::Installed(k),
                None => RenewableCapital::Flexible,
            },
            solver: self.solver,
            horizon: self.simulation.horizon,
            initial_capital: self.simulation.initial_capital,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_baseline() {
        let cfg = ScenarioConfig::from_preset("baseline");
        assert!(cfg.is_ok());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
horizon = 30
initial_capital = [550.0, 560.0]

[consumer]
demand = 900.0

[renewable]
capital_share = 0.35
tfp = 3.0
installed_capital = 20.0

[non_renewable]
capital_share = 0.6
tfp = 2.5

[market]
gross_interest_rate = 1.05
fossil_fuel_price = 1.2
adjustment_cost = 0.5
investment_elasticity = 0.8

[solver]
max_iterations = 200
tolerance = 1e-10

[sweep]
samples = 10
seed = 7
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.horizon), Some(30));
        assert_eq!(
            cfg.as_ref().map(|c| c.simulation.initial_capital),
            Some([550.0, 560.0])
        );
        assert_eq!(
            cfg.as_ref().and_then(|c| c.renewable.installed_capital),
            Some(20.0)
        );
        assert_eq!(cfg.as_ref().map(|c| c.solver.max_iterations), Some(200));
        // unset solver fields keep their defaults
        assert_eq!(cfg.as_ref().map(|c| c.solver.bracket_growth), Some(2.0));
        assert_eq!(cfg.as_ref().map(|c| c.sweep.points().len()), Some(10));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[market]
gross_interest_rate = 1.09
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result = ScenarioConfig::from_toml_str("[battery]\ncapacity_kwh = 10.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_short_horizon() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.horizon = 1;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.horizon"));
    }

    #[test]
    fn validation_catches_rate_at_or_below_one() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.market.gross_interest_rate = 0.09;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "market.gross_interest_rate")
        );
    }

    #[test]
    fn validation_catches_degenerate_shares() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.renewable.capital_share = 1.0;
        cfg.non_renewable.capital_share = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "renewable.capital_share"));
        assert!(
            errors
                .iter()
                .any(|e| e.field == "non_renewable.capital_share")
        );
    }

    #[test]
    fn validation_requires_adjustment_costs() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.market.adjustment_cost = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "market.adjustment_cost"));
    }

    #[test]
    fn validation_catches_negative_seed_capital() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.initial_capital = [600.0, -1.0];
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "simulation.initial_capital")
        );
    }

    #[test]
    fn validation_catches_zero_seed_capital() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.initial_capital = [0.0, 600.0];
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "simulation.initial_capital")
        );
        assert!(cfg.build().is_err());
    }

    #[test]
    fn validation_catches_bad_sweep_values() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sweep.renewable_shares = vec![0.3, 1.2];
        cfg.sweep.adjustment_costs = vec![-1.0];
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "sweep.renewable_shares"));
        assert!(errors.iter().any(|e| e.field == "sweep.adjustment_costs"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn build_produces_domain_types() {
        let scenario = ScenarioConfig::installed_renewables().build().unwrap();
        assert_eq!(scenario.renewable_capital, RenewableCapital::Installed(50.0));
        assert_eq!(scenario.horizon, 50);
        assert_eq!(scenario.parameters.non_renewable.capital_share(), 0.67);

        let mut bad = ScenarioConfig::baseline();
        bad.consumer.demand = 0.0;
        bad.market.fossil_fuel_price = -1.0;
        assert_eq!(bad.build().unwrap_err().len(), 2);
    }

    #[test]
    fn rigid_capital_has_larger_adjustment_cost() {
        let base = ScenarioConfig::baseline();
        let rigid = ScenarioConfig::rigid_capital();
        assert!(rigid.market.adjustment_cost > base.market.adjustment_cost);
    }

    #[test]
    fn grid_sweep_by_default() {
        let cfg = ScenarioConfig::baseline();
        assert_eq!(cfg.sweep.points().len(), 12);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[market]
adjustment_cost = 2.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // adjustment cost overridden
        assert_eq!(cfg.as_ref().map(|c| c.market.adjustment_cost), Some(2.0));
        // interest rate kept default
        assert_eq!(
            cfg.as_ref().map(|c| c.market.gross_interest_rate),
            Some(1.09)
        );
        // simulation kept default
        assert_eq!(cfg.as_ref().map(|c| c.simulation.horizon), Some(50));
    }
}
