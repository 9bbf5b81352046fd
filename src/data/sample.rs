//! Synthetic magnetization sweeps generated from the model itself.
//!
//! Useful for exercising the full pipeline without simulator output on disk,
//! and for tests that need controlled ground truth. Curves are generated
//! from a known `(M0, Tc, β)` triple plus additive Gaussian noise; the seed
//! fully determines the output.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::DataPoint;
use crate::error::AppError;
use crate::models::magnetization;

/// Parameters for one synthetic sweep.
#[derive(Debug, Clone, Copy)]
pub struct SampleSpec {
    pub truth: [f64; 3],
    pub t_min: f64,
    pub t_max: f64,
    pub t_step: f64,
    /// Standard deviation of the additive noise.
    pub noise: f64,
    /// Nominal equilibration-step count; jittered per sample.
    pub eq_steps: f64,
}

impl Default for SampleSpec {
    fn default() -> Self {
        SampleSpec {
            truth: [1.0, 2.2, 0.25],
            t_min: 1e-4,
            t_max: 3.0,
            t_step: 0.01,
            noise: 0.005,
            eq_steps: 50.0,
        }
    }
}

/// Generate one synthetic run for the given seed.
pub fn generate_sample(spec: &SampleSpec, seed: u64) -> Result<DataPoint, AppError> {
    if !(spec.t_step > 0.0 && spec.t_max > spec.t_min) {
        return Err(AppError::new(2, "Invalid temperature range for sample generation."));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, spec.noise.max(0.0))
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let [m0, tc, beta] = spec.truth;
    let mut ts = Vec::new();
    let mut ms = Vec::new();
    let mut energy = Vec::new();
    let mut time = Vec::new();
    let mut n = Vec::new();

    let mut t = spec.t_min;
    let mut i = 0usize;
    while t < spec.t_max {
        let m = magnetization(t, m0, tc, beta) + normal.sample(&mut rng);
        ts.push(t);
        ms.push(m);
        // A crude energy proxy: ordered phases sit lower.
        energy.push(-2.0 * m.abs());
        time.push(i as f64);
        // Relaxation slows near the transition.
        let crit = 1.0 / ((t - tc).abs() + 0.05);
        n.push((spec.eq_steps + crit * rng.gen_range(0.5..1.5)).round());
        t += spec.t_step;
        i += 1;
    }

    let mut point = DataPoint::new(ts, ms, energy, time, n, seed).map_err(AppError::from)?;
    point.deg_avg = 4.0;
    point.deg_mse = 0.0;
    Ok(point)
}

/// Generate a whole group's worth of runs, one per seed.
///
/// Runs are truncated at their zero crossing plus a short tail, at a
/// seed-dependent length, so the generated group is ragged the same way real
/// simulator output is.
pub fn generate_group(spec: &SampleSpec, seeds: &[u64]) -> Result<Vec<DataPoint>, AppError> {
    let mut out = Vec::with_capacity(seeds.len());
    for (k, &seed) in seeds.iter().enumerate() {
        let mut point = generate_sample(spec, seed)?;
        if k > 0 {
            // Drop a few trailing samples to vary run lengths.
            let cut = point.ts.len().saturating_sub(3 * k);
            point.ts.truncate(cut);
            point.ms.truncate(cut);
            point.energy.truncate(cut);
            point.time.truncate(cut);
            point.n.truncate(cut);
        }
        out.push(point);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_deterministic_per_seed() {
        let spec = SampleSpec::default();
        let a = generate_sample(&spec, 1).unwrap();
        let b = generate_sample(&spec, 1).unwrap();
        assert_eq!(a.ms, b.ms);

        let c = generate_sample(&spec, 2).unwrap();
        assert_ne!(a.ms, c.ms);
    }

    #[test]
    fn sample_columns_stay_aligned() {
        let p = generate_sample(&SampleSpec::default(), 3).unwrap();
        assert_eq!(p.ts.len(), p.ms.len());
        assert_eq!(p.ts.len(), p.n.len());
        assert_eq!(p.ts.len(), p.energy.len());
    }

    #[test]
    fn group_is_ragged() {
        let points = generate_group(&SampleSpec::default(), &[1, 2, 3]).unwrap();
        assert!(points[1].ts.len() < points[0].ts.len());
        assert!(points[2].ts.len() < points[1].ts.len());
    }
}
