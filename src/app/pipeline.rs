//! The shared batch-analysis pipeline.
//!
//! One pass per group, fully sequential:
//!
//! per-seed fits -> parameter register, then
//! envelope -> midpoint -> one consensus fit, then
//! equilibration-step histogram
//!
//! A failed per-seed fit is logged with its seed and skipped; it never aborts
//! the group. Structural failures (misaligned columns, empty groups) are
//! loader-contract violations and propagate immediately.

use log::{debug, warn};

use crate::aggregate::{self, ParamRegister, ParamSummary};
use crate::domain::{AnalysisConfig, EnvelopeCurve, FitCurve, Group};
use crate::error::{AnalysisError, AppError};
use crate::fit::{fit, FitOptions};
use crate::hist::{bin_counts, Bin};

/// Everything computed for one group.
#[derive(Debug, Clone)]
pub struct GroupAnalysis {
    pub label: String,
    /// Successful per-seed fits, in input order.
    pub seed_fits: Vec<(u64, FitCurve)>,
    /// Seeds whose fit failed, with the reason.
    pub skipped: Vec<(u64, AnalysisError)>,
    pub envelope: EnvelopeCurve,
    /// Representative curve derived from the envelope extremes.
    pub midpoint: (Vec<f64>, Vec<f64>),
    /// Fit of the midpoint curve; `None` when it fails (logged).
    pub consensus: Option<FitCurve>,
    /// Mean fitted triple across recorded seeds; `None` if every fit failed.
    pub summary: Option<ParamSummary>,
    /// Histogram of equilibration step counts across all runs.
    pub eq_hist: Vec<(Bin, usize)>,
}

/// Output of one batch run over all groups.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub groups: Vec<GroupAnalysis>,
    pub register: ParamRegister,
}

/// Analyze every group sequentially. Groups and seeds keep input order.
pub fn run_phase(groups: &[Group], config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let mut register = ParamRegister::new();
    let mut analyses = Vec::with_capacity(groups.len());

    for group in groups {
        let analysis = analyze_group(group, config, &mut register)?;
        analyses.push(analysis);
    }

    Ok(RunOutput {
        groups: analyses,
        register,
    })
}

fn analyze_group(
    group: &Group,
    config: &AnalysisConfig,
    register: &mut ParamRegister,
) -> Result<GroupAnalysis, AppError> {
    if group.data.is_empty() {
        return Err(AnalysisError::EmptyGroup {
            label: group.label.clone(),
        }
        .into());
    }

    let opts = FitOptions {
        saturation_threshold: config.saturation_threshold,
        max_iterations: config.max_iterations,
        initial_guess: config.initial_guess,
    };

    // Per-seed fits, in input order.
    let mut seed_fits = Vec::new();
    let mut skipped = Vec::new();
    for point in &group.data {
        match fit(&point.ts, &point.ms, &config.bounds, &opts) {
            Ok(curve) => {
                register.record(&group.label, curve.m0, curve.tc, curve.beta);
                seed_fits.push((point.seed, curve));
            }
            Err(err) if err.is_fit_failure() => {
                warn!("[{}] seed={}: {err}, skipping run", group.label, point.seed);
                skipped.push((point.seed, err));
            }
            Err(err) => return Err(err.into()),
        }
    }

    // Group-level consensus: envelope -> midpoint -> one fit.
    let sequences: Vec<Vec<f64>> = group.data.iter().map(|p| p.ms.clone()).collect();
    let reference_x = group
        .data
        .iter()
        .max_by_key(|p| p.ts.len())
        .map(|p| p.ts.clone())
        .unwrap_or_default();

    let envelope = aggregate::aggregate(&group.label, &sequences, &reference_x)?;
    let midpoint = aggregate::build(
        &envelope.x,
        &envelope.min,
        &envelope.max,
        config.window_radius,
    )?;

    let consensus = match fit(&midpoint.0, &midpoint.1, &config.bounds, &opts) {
        Ok(curve) => {
            debug!(
                "[{}] consensus fit: M_0={}, T_C={}, β={}",
                group.label, curve.m0, curve.tc, curve.beta
            );
            Some(curve)
        }
        Err(err) if err.is_fit_failure() => {
            warn!("[{}] consensus fit failed: {err}", group.label);
            None
        }
        Err(err) => return Err(err.into()),
    };

    let summary = register.summary(&group.label).ok();
    if summary.is_none() {
        warn!("[{}] no per-seed fit succeeded", group.label);
    }

    // Equilibration-step histogram over every sample of every run.
    let step_counts: Vec<f64> = group.data.iter().flat_map(|p| p.n.iter().copied()).collect();
    let eq_hist = bin_counts(&step_counts, config.hist_buckets, None);

    Ok(GroupAnalysis {
        label: group.label.clone(),
        seed_fits,
        skipped,
        envelope,
        midpoint,
        consensus,
        summary,
        eq_hist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::group_from_points;
    use crate::data::{generate_group, SampleSpec};
    use crate::domain::DataPoint;

    fn synthetic_regular_group(seeds: &[u64]) -> Group {
        let spec = SampleSpec {
            noise: 0.002,
            ..SampleSpec::default()
        };
        group_from_points("regular", generate_group(&spec, seeds).unwrap())
    }

    #[test]
    fn two_seed_batch_recovers_tc_and_registers_means() {
        let group = synthetic_regular_group(&[1, 2]);
        let config = AnalysisConfig::default();

        let out = run_phase(&[group], &config).unwrap();
        let analysis = &out.groups[0];

        assert_eq!(analysis.seed_fits.len(), 2);
        let mut tc_sum = 0.0;
        for (_, curve) in &analysis.seed_fits {
            assert!((curve.tc - 2.2).abs() / 2.2 < 0.01, "tc={}", curve.tc);
            tc_sum += curve.tc;
        }

        let summary = out.register.summary("regular").unwrap();
        assert!((summary.tc - tc_sum / 2.0).abs() < 1e-12);
    }

    #[test]
    fn bad_run_is_skipped_not_fatal() {
        let mut group = synthetic_regular_group(&[1]);
        // A run that is non-positive from the start can never be windowed.
        let bad = DataPoint::new(
            vec![0.1, 0.2, 0.3],
            vec![-0.5, -0.4, -0.3],
            vec![0.0; 3],
            vec![0.0, 1.0, 2.0],
            vec![50.0; 3],
            99,
        )
        .unwrap();
        group.data.push(bad);

        let out = run_phase(&[group], &AnalysisConfig::default()).unwrap();
        let analysis = &out.groups[0];

        assert_eq!(analysis.seed_fits.len(), 1);
        assert_eq!(analysis.skipped.len(), 1);
        assert_eq!(analysis.skipped[0].0, 99);
        assert_eq!(out.register.count("regular"), 1);
    }

    #[test]
    fn consensus_fit_tracks_the_truth() {
        let group = synthetic_regular_group(&[1, 2, 3]);
        let out = run_phase(&[group], &AnalysisConfig::default()).unwrap();

        let consensus = out.groups[0].consensus.as_ref().unwrap();
        assert!((consensus.tc - 2.2).abs() / 2.2 < 0.02, "tc={}", consensus.tc);
    }

    #[test]
    fn empty_group_is_fatal() {
        let group = group_from_points("regular", Vec::new());
        let err = run_phase(&[group], &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn histogram_covers_all_samples_below_max() {
        let group = synthetic_regular_group(&[1, 2]);
        let total_samples: usize = group.data.iter().map(|p| p.n.len()).sum();

        let out = run_phase(&[group], &AnalysisConfig::default()).unwrap();
        let counted: usize = out.groups[0].eq_hist.iter().map(|(_, c)| c).sum();

        // Default bounds come from the data, so samples equal to the global
        // maximum fall outside the top half-open bucket; everything else
        // must be counted exactly once.
        assert!(counted < total_samples);
        assert!(counted > total_samples / 2);
    }
}
