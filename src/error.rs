//! Error types for the energy transition model.
//!
//! Every fallible operation in the crate returns [`ModelError`] through the
//! [`Result`] alias. Sector functions validate their inputs eagerly; the
//! market and simulator layers only propagate.

/// Errors raised by sector algebra, market clearing, and capital dynamics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A parameter or intermediate quantity left its admissible domain.
    #[error("domain error: {name} = {value} {constraint}")]
    Domain {
        /// Name of the offending quantity.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint, e.g. `"must be > 0"`.
        constraint: &'static str,
    },

    /// Excess demand never changed sign while expanding the price bracket.
    #[error(
        "no equilibrium: excess demand keeps its sign on [{lower:e}, {upper:e}] \
         after {expansions} bracket expansions"
    )]
    NoEquilibrium {
        /// Lowest price probed.
        lower: f64,
        /// Highest price probed.
        upper: f64,
        /// Number of expansions performed.
        expansions: usize,
    },

    /// The root finder exhausted its iteration budget.
    #[error("root finder did not converge after {iterations} iterations (|excess demand| = {residual:e})")]
    Convergence {
        /// Iterations performed.
        iterations: usize,
        /// Absolute excess demand at the best price found.
        residual: f64,
    },

    /// The capital trajectory left the non-negative, finite domain.
    #[error("capital diverged at period {period}: {capital}")]
    Divergence {
        /// Period at which the invalid capital level was produced.
        period: usize,
        /// The invalid capital level.
        capital: f64,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ModelError>;

pub(crate) fn domain(name: &'static str, value: f64, constraint: &'static str) -> ModelError {
    ModelError::Domain {
        name,
        value,
        constraint,
    }
}

/// Requires `value > 0` and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(domain(name, value, "must be finite and > 0"))
    }
}

/// Requires `value >= 0` and finite.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(domain(name, value, "must be finite and >= 0"))
    }
}

/// Requires `value` strictly inside `(0, 1)`.
pub(crate) fn ensure_open_unit(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(domain(name, value, "must lie in (0, 1)"))
    }
}

/// Converts a NaN/Inf arithmetic result into a domain error.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(domain(name, value, "is not finite"))
    }
}
