//! Damped normal-equation solver for the Levenberg–Marquardt step.
//!
//! Each optimizer iteration solves the small 3×3 system
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr
//! ```
//!
//! Implementation choices:
//! - We use SVD rather than Cholesky so near-singular Jacobians (common on
//!   short, noisy fit windows) degrade to `None` instead of panicking.
//! - Progressively looser tolerances are tried before giving up, so one
//!   ill-conditioned iteration does not kill the whole fit; the caller then
//!   raises λ and retries.

use nalgebra::{DMatrix, DVector};

/// Solve one damped step. Returns `None` if the system is too ill-conditioned.
pub fn solve_damped_step(
    jtj: &DMatrix<f64>,
    jtr: &DVector<f64>,
    lambda: f64,
) -> Option<DVector<f64>> {
    let n = jtj.nrows();
    let mut damped = jtj.clone();
    for i in 0..n {
        // Marquardt scaling: damp proportionally to the curvature, with a
        // floor so zero-curvature directions stay solvable.
        let d = jtj[(i, i)].max(1e-12);
        damped[(i, i)] += lambda * d;
    }

    let svd = damped.svd(true, true);
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(delta) = svd.solve(jtr, tol) {
            if delta.iter().all(|v| v.is_finite()) {
                return Some(delta);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undamped_step_solves_exact_system() {
        // JᵀJ = I, Jᵀr = [1, 2, 3] -> δ = [1, 2, 3] at λ = 0.
        let jtj = DMatrix::identity(3, 3);
        let jtr = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let delta = solve_damped_step(&jtj, &jtr, 0.0).unwrap();
        for (d, e) in delta.iter().zip([1.0, 2.0, 3.0]) {
            assert!((d - e).abs() < 1e-10);
        }
    }

    #[test]
    fn damping_shrinks_the_step() {
        let jtj = DMatrix::identity(3, 3);
        let jtr = DVector::from_row_slice(&[1.0, 1.0, 1.0]);
        let free = solve_damped_step(&jtj, &jtr, 0.0).unwrap();
        let damped = solve_damped_step(&jtj, &jtr, 10.0).unwrap();
        assert!(damped.norm() < free.norm());
    }
}
