//! Box-constrained Levenberg–Marquardt fit of the critical-exponent model.
//!
//! Given a saturation curve `(xs, ys)` and physical priors as box bounds on
//! `(M0, Tc, β)`, we:
//!
//! - window the curve (`math::window`) to its informative range
//! - minimize the sum of squared residuals with a damped Gauss–Newton
//!   iteration, projecting every step back into the box
//!
//! The starting point defaults to the midpoint of the bounds. This is an
//! explicit, documented choice: the objective has local optima on noisy
//! windows, so the result depends on where the iteration starts.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::domain::{FitBounds, FitCurve};
use crate::error::AnalysisError;
use crate::math::{slice_data, solve_damped_step};
use crate::models::{evaluate, magnetization, residuals, sse};

/// Options that affect how a single curve is fit.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    /// Samples above this value are treated as saturated and excluded from
    /// the window. Historical analyses used both 0.9 and 0.96.
    pub saturation_threshold: f64,
    /// Iteration budget. The fit fails loudly when this is exhausted rather
    /// than silently truncating.
    pub max_iterations: usize,
    /// Optimizer starting point. `None` means the midpoint of the bounds.
    pub initial_guess: Option<[f64; 3]>,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            saturation_threshold: 0.96,
            max_iterations: 10_000,
            initial_guess: None,
        }
    }
}

const PARAM_NAMES: [&str; 3] = ["M0", "Tc", "beta"];

/// Relative improvement below which the iteration is considered converged.
const FTOL: f64 = 1e-12;
/// Step-norm threshold for convergence.
const XTOL: f64 = 1e-12;
/// Damping ceiling: once no damped step improves the objective, the iterate
/// is a local minimum.
const LAMBDA_MAX: f64 = 1e12;

/// Fit the model to one curve. Windows first, then optimizes.
pub fn fit(
    xs: &[f64],
    ys: &[f64],
    bounds: &FitBounds,
    opts: &FitOptions,
) -> Result<FitCurve, AnalysisError> {
    let (xw, yw) = slice_data(xs, ys, opts.saturation_threshold)?;
    let n = xw.len();
    if n < 3 {
        return Err(AnalysisError::TooFewPoints { n });
    }

    let start = bounds.clamp(opts.initial_guess.unwrap_or_else(|| bounds.midpoint()));
    let params = minimize(xw, yw, bounds, start, opts.max_iterations)?;
    check_bound_saturation(&params, bounds)?;

    let [m0, tc, beta] = params;
    debug!("M_0={m0}, T_C={tc}, β={beta}");

    Ok(FitCurve {
        m0,
        tc,
        beta,
        xs: xw.to_vec(),
        ys: evaluate(xw, params),
    })
}

/// Projected Levenberg–Marquardt over the box.
fn minimize(
    xs: &[f64],
    ys: &[f64],
    bounds: &FitBounds,
    start: [f64; 3],
    budget: usize,
) -> Result<[f64; 3], AnalysisError> {
    let mut p = start;
    let mut cost = sse(xs, ys, p);
    let mut lambda = 1e-3;
    // `p` is only a trustworthy iterate once the solver has produced at
    // least one usable step; a system that never solves (e.g. non-finite
    // residuals) must fail instead of echoing the starting point.
    let mut solver_ok = false;

    for _ in 0..budget {
        let jac = jacobian(xs, p);
        let r = DVector::from_vec(residuals(xs, ys, p));
        let jtj = jac.transpose() * &jac;
        // Gauss–Newton right-hand side: minimize ‖r + Jδ‖ -> (JᵀJ)δ = −Jᵀr.
        let jtr = -(jac.transpose() * &r);

        // Inner loop: escalate damping until a step improves the objective.
        loop {
            let Some(delta) = solve_damped_step(&jtj, &jtr, lambda) else {
                lambda *= 10.0;
                if lambda > LAMBDA_MAX {
                    return if solver_ok {
                        Ok(p)
                    } else {
                        Err(AnalysisError::NoConvergence { budget })
                    };
                }
                continue;
            };
            solver_ok = true;

            let candidate = bounds.clamp([p[0] + delta[0], p[1] + delta[1], p[2] + delta[2]]);
            let candidate_cost = sse(xs, ys, candidate);

            if candidate_cost.is_finite() && candidate_cost < cost {
                let improvement = cost - candidate_cost;
                let step_norm = (0..3)
                    .map(|i| (candidate[i] - p[i]).powi(2))
                    .sum::<f64>()
                    .sqrt();
                p = candidate;
                cost = candidate_cost;
                lambda = (lambda / 10.0).max(1e-12);

                if improvement <= FTOL * (cost + FTOL) || step_norm <= XTOL {
                    return Ok(p);
                }
                break;
            }

            lambda *= 10.0;
            if lambda > LAMBDA_MAX {
                // No damped step improves the objective: local minimum.
                return Ok(p);
            }
        }
    }

    Err(AnalysisError::NoConvergence { budget })
}

/// Forward-difference Jacobian of the residual vector, `∂r/∂p = −∂M/∂p`.
fn jacobian(xs: &[f64], p: [f64; 3]) -> DMatrix<f64> {
    let n = xs.len();
    let mut jac = DMatrix::zeros(n, 3);
    let base: Vec<f64> = xs
        .iter()
        .map(|&t| magnetization(t, p[0], p[1], p[2]))
        .collect();

    for j in 0..3 {
        let h = 1e-7 * p[j].abs().max(1.0);
        let mut bumped = p;
        bumped[j] += h;
        for (i, &t) in xs.iter().enumerate() {
            let m = magnetization(t, bumped[0], bumped[1], bumped[2]);
            jac[(i, j)] = -(m - base[i]) / h;
        }
    }
    jac
}

fn check_bound_saturation(p: &[f64; 3], bounds: &FitBounds) -> Result<(), AnalysisError> {
    for i in 0..3 {
        let span = (bounds.upper[i] - bounds.lower[i]).abs().max(1e-12);
        let tol = 1e-8 * span;
        if (p[i] - bounds.lower[i]).abs() <= tol || (p[i] - bounds.upper[i]).abs() <= tol {
            return Err(AnalysisError::BoundSaturated {
                param: PARAM_NAMES[i],
                value: p[i],
            });
        }
    }
    Ok(())
}
