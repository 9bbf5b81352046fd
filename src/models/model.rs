//! The critical-exponent magnetization law.
//!
//! Near a continuous phase transition the order parameter follows
//!
//! ```text
//! M(T) = M0 · sign(1 − T/Tc) · |1 − T/Tc|^β
//! ```
//!
//! The signed form stays defined past `Tc`, which matters because fit windows
//! can include samples slightly above the transition; the plain
//! `max(1 − T/Tc, 0)^β` variant would flatten those to zero and bias the fit.

/// Evaluate `M(T)` for the parameter triple `(M0, Tc, β)`.
pub fn magnetization(t: f64, m0: f64, tc: f64, beta: f64) -> f64 {
    let v = 1.0 - t / tc;
    m0 * v.signum() * v.abs().powf(beta)
}

/// Evaluate the model over a domain.
pub fn evaluate(xs: &[f64], params: [f64; 3]) -> Vec<f64> {
    let [m0, tc, beta] = params;
    xs.iter().map(|&t| magnetization(t, m0, tc, beta)).collect()
}

/// Residuals `y_i − M(x_i)`.
pub fn residuals(xs: &[f64], ys: &[f64], params: [f64; 3]) -> Vec<f64> {
    let [m0, tc, beta] = params;
    xs.iter()
        .zip(ys.iter())
        .map(|(&t, &y)| y - magnetization(t, m0, tc, beta))
        .collect()
}

/// Sum of squared residuals.
pub fn sse(xs: &[f64], ys: &[f64], params: [f64; 3]) -> f64 {
    residuals(xs, ys, params).iter().map(|r| r * r).sum()
}
