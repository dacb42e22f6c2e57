//! Bracketing root finder for monotone excess-demand functions.
//!
//! [`bracket_root`] walks geometrically from a starting price until the
//! function changes sign; [`brent`] then refines the bracket with Brent's
//! method (inverse quadratic interpolation safeguarded by bisection).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ModelError, Result, domain, ensure_positive};

/// Tuning knobs of the bracket search and the Brent refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverOptions {
    /// Starting price when no seed is supplied.
    pub initial_price: f64,
    /// Multiplicative step of each bracket expansion (> 1).
    pub bracket_growth: f64,
    /// Maximum number of bracket expansions before giving up.
    pub max_bracket_expansions: usize,
    /// Absolute tolerance on the function value.
    pub tolerance: f64,
    /// Absolute part of the tolerance on the root location.
    pub price_tolerance: f64,
    /// Maximum Brent iterations.
    pub max_iterations: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            initial_price: 1e-6,
            bracket_growth: 2.0,
            max_bracket_expansions: 64,
            tolerance: 1e-8,
            price_tolerance: 1e-15,
            max_iterations: 100,
        }
    }
}

/// Interval on which the function changes sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
    pub f_lower: f64,
    pub f_upper: f64,
    /// Expansions needed to find the interval.
    pub expansions: usize,
}

/// Located root and the effort spent finding it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub value: f64,
    pub residual: f64,
    pub expansions: usize,
    pub iterations: usize,
}

/// Expands geometrically from `start` until `f` changes sign.
///
/// `f` must be decreasing: a positive value moves the search upward, a
/// negative value downward.
///
/// # Errors
///
/// Returns `ModelError::NoEquilibrium` if no sign change is found within
/// `options.max_bracket_expansions`, `ModelError::Domain` for an invalid
/// start or growth factor, and propagates errors raised by `f`.
pub fn bracket_root<F>(mut f: F, start: f64, options: &SolverOptions) -> Result<Bracket>
where
    F: FnMut(f64) -> Result<f64>,
{
    let start = ensure_positive("initial_price", start)?;
    let growth = options.bracket_growth;
    if !(growth.is_finite() && growth > 1.0) {
        return Err(domain("bracket_growth", growth, "must be finite and > 1"));
    }

    let mut x = start;
    let mut fx = f(x)?;
    if fx == 0.0 {
        return Ok(Bracket {
            lower: x,
            upper: x,
            f_lower: fx,
            f_upper: fx,
            expansions: 0,
        });
    }
    let upward = fx > 0.0;

    for expansion in 1..=options.max_bracket_expansions {
        let next = if upward { x * growth } else { x / growth };
        let f_next = f(next)?;
        trace!(price = next, excess = f_next, "bracket expansion");
        if upward && f_next <= 0.0 {
            return Ok(Bracket {
                lower: x,
                upper: next,
                f_lower: fx,
                f_upper: f_next,
                expansions: expansion,
            });
        }
        if !upward && f_next >= 0.0 {
            return Ok(Bracket {
                lower: next,
                upper: x,
                f_lower: f_next,
                f_upper: fx,
                expansions: expansion,
            });
        }
        x = next;
        fx = f_next;
    }

    let (lower, upper) = if upward { (start, x) } else { (x, start) };
    Err(ModelError::NoEquilibrium {
        lower,
        upper,
        expansions: options.max_bracket_expansions,
    })
}

/// Refines a sign-changing bracket with Brent's method.
///
/// Stops when `|f| <= options.tolerance` or the bracket is narrower than
/// `options.price_tolerance + 4 * EPSILON * |x|`.
///
/// # Errors
///
/// Returns `ModelError::Convergence` after `options.max_iterations` steps
/// without meeting either tolerance, and propagates errors raised by `f`.
pub fn brent<F>(mut f: F, bracket: &Bracket, options: &SolverOptions) -> Result<Root>
where
    F: FnMut(f64) -> Result<f64>,
{
    let (mut a, mut b) = (bracket.lower, bracket.upper);
    let (mut fa, mut fb) = (bracket.f_lower, bracket.f_upper);
    let found = |value: f64, residual: f64, iterations: usize| Root {
        value,
        residual: residual.abs(),
        expansions: bracket.expansions,
        iterations,
    };

    if fa.abs() <= options.tolerance {
        return Ok(found(a, fa, 0));
    }
    if fb.abs() <= options.tolerance {
        return Ok(found(b, fb, 0));
    }

    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..options.max_iterations {
        if (fb > 0.0) == (fc > 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * options.price_tolerance;
        let midpoint = 0.5 * (c - b);
        if fb.abs() <= options.tolerance || midpoint.abs() <= tol {
            return Ok(found(b, fb, iteration));
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // secant
                (2.0 * midpoint * s, 1.0 - s)
            } else {
                // inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * midpoint * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let bound = (3.0 * midpoint * q - (tol * q).abs()).min((e * q).abs());
            if 2.0 * p < bound {
                e = d;
                d = p / q;
            } else {
                d = midpoint;
                e = d;
            }
        } else {
            d = midpoint;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else {
            tol.copysign(midpoint)
        };
        fb = f(b)?;
    }

    Err(ModelError::Convergence {
        iterations: options.max_iterations,
        residual: fb.abs(),
    })
}

/// Brackets and refines the root of a decreasing function starting at `start`.
///
/// # Errors
///
/// See [`bracket_root`] and [`brent`].
pub fn find_root<F>(mut f: F, start: f64, options: &SolverOptions) -> Result<Root>
where
    F: FnMut(f64) -> Result<f64>,
{
    let bracket = bracket_root(&mut f, start, options)?;
    if bracket.lower == bracket.upper {
        return Ok(Root {
            value: bracket.lower,
            residual: 0.0,
            expansions: 0,
            iterations: 0,
        });
    }
    brent(f, &bracket, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decreasing_cubic(x: f64) -> Result<f64> {
        Ok(8.0 - x * x * x)
    }

    #[test]
    fn finds_cube_root() {
        let root = find_root(decreasing_cubic, 1e-6, &SolverOptions::default()).unwrap();
        assert!((root.value - 2.0).abs() < 1e-8, "got {}", root.value);
        assert!(root.residual <= 1e-8);
        assert!(root.expansions > 0);
    }

    #[test]
    fn searches_downward_from_a_high_start() {
        let root = find_root(|x| Ok(0.5 - x), 1e3, &SolverOptions::default()).unwrap();
        assert!((root.value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn exact_start_is_returned_unchanged() {
        let root = find_root(|x| Ok(4.0 - x), 4.0, &SolverOptions::default()).unwrap();
        assert_eq!(root.value, 4.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    fn no_sign_change_is_no_equilibrium() {
        let options = SolverOptions {
            max_bracket_expansions: 10,
            ..SolverOptions::default()
        };
        let err = find_root(|_| Ok(-1.0), 1.0, &options).unwrap_err();
        match err {
            ModelError::NoEquilibrium {
                lower,
                upper,
                expansions,
            } => {
                assert_eq!(expansions, 10);
                assert_eq!(upper, 1.0);
                assert!((lower - 1.0 / 1024.0).abs() < 1e-15);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exhausted_iterations_is_convergence_error() {
        let options = SolverOptions {
            max_iterations: 0,
            ..SolverOptions::default()
        };
        assert!(matches!(
            find_root(decreasing_cubic, 1e-6, &options),
            Err(ModelError::Convergence { iterations: 0, .. })
        ));
    }

    #[test]
    fn rejects_growth_at_or_below_one() {
        let options = SolverOptions {
            bracket_growth: 1.0,
            ..SolverOptions::default()
        };
        assert!(matches!(
            find_root(decreasing_cubic, 1.0, &options),
            Err(ModelError::Domain { .. })
        ));
    }

    #[test]
    fn errors_from_the_function_propagate() {
        let err = find_root(
            |x| {
                if x > 1.0 {
                    Err(domain("x", x, "must be <= 1"))
                } else {
                    Ok(1.0)
                }
            },
            0.5,
            &SolverOptions::default(),
        );
        assert!(matches!(err, Err(ModelError::Domain { name: "x", .. })));
    }
}
