//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - reloaded from simulator output (JSON descriptor + CSV table)
//! - handed to reporting/plotting without further conversion

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalysisError;

/// Simulator run configuration as stored in the descriptor.
///
/// The simulator serializes its full CLI argument struct here; we only
/// consume the fields the analysis needs and keep the rest opaque.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Lattice edge length.
    pub size: Option<usize>,
    /// Field step for hysteresis sweeps.
    pub h_step: Option<f64>,
    /// Everything else the simulator recorded.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A run descriptor (`desc.json`), written by the simulator next to the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    pub data_path: PathBuf,
    pub seed: u64,
    pub deg_avg: f64,
    pub deg_mse: f64,
    #[serde(default)]
    pub config: RunConfig,
}

/// One simulation run: the descriptor metadata plus its aligned sample columns.
///
/// Invariant: all per-sample sequences share length and index alignment.
/// `DataPoint::new` enforces this against `ts`.
#[derive(Debug, Clone)]
pub struct DataPoint {
    /// Temperature (phase sweeps) or applied field (hysteresis) per sample.
    pub ts: Vec<f64>,
    /// Magnetization per sample.
    pub ms: Vec<f64>,
    /// Energy per sample.
    pub energy: Vec<f64>,
    /// Sweep/time index per sample.
    pub time: Vec<f64>,
    /// Equilibration step count per sample.
    pub n: Vec<f64>,

    pub seed: u64,
    pub deg_avg: f64,
    pub deg_mse: f64,

    /// The descriptor this run was loaded from.
    pub desc: Option<Descriptor>,
}

impl DataPoint {
    /// Build a run, validating that every column is aligned with `ts`.
    pub fn new(
        ts: Vec<f64>,
        ms: Vec<f64>,
        energy: Vec<f64>,
        time: Vec<f64>,
        n: Vec<f64>,
        seed: u64,
    ) -> Result<Self, AnalysisError> {
        let len = ts.len();
        for col in [&ms, &energy, &time, &n] {
            if col.len() != len {
                return Err(AnalysisError::MismatchedLength {
                    left: len,
                    right: col.len(),
                });
            }
        }
        Ok(DataPoint {
            ts,
            ms,
            energy,
            time,
            n,
            seed,
            deg_avg: 0.0,
            deg_mse: 0.0,
            desc: None,
        })
    }
}

/// A topology class: an ordered, immutable collection of runs.
#[derive(Debug, Clone)]
pub struct Group {
    pub label: String,
    /// Substring pattern the classifier matched data paths against.
    pub pattern: String,
    pub data: Vec<DataPoint>,
}

/// Per-parameter box constraints for the critical-exponent fit.
///
/// Order everywhere is `(M0, Tc, β)`, matching the model signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBounds {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
}

impl FitBounds {
    pub fn new(lower: [f64; 3], upper: [f64; 3]) -> Self {
        FitBounds { lower, upper }
    }

    /// Midpoint of each box — the documented default initial guess.
    pub fn midpoint(&self) -> [f64; 3] {
        [
            (self.lower[0] + self.upper[0]) / 2.0,
            (self.lower[1] + self.upper[1]) / 2.0,
            (self.lower[2] + self.upper[2]) / 2.0,
        ]
    }

    pub fn clamp(&self, p: [f64; 3]) -> [f64; 3] {
        [
            p[0].clamp(self.lower[0], self.upper[0]),
            p[1].clamp(self.lower[1], self.upper[1]),
            p[2].clamp(self.lower[2], self.upper[2]),
        ]
    }
}

/// A fitted critical-exponent triple plus the curve it was fit over.
///
/// `xs` is the windowed x-domain; `ys` is the model evaluated on it.
#[derive(Debug, Clone)]
pub struct FitCurve {
    pub m0: f64,
    pub tc: f64,
    pub beta: f64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// Per-index (min, mean, max) curves over a ragged collection of sequences.
///
/// `mean` and `max` cover the union of available indices; `min` covers only
/// indices where every input sequence has data, so `min.len() <= mean.len()`.
#[derive(Debug, Clone)]
pub struct EnvelopeCurve {
    /// Reference x-domain, taken from the longest input sequence.
    pub x: Vec<f64>,
    pub min: Vec<f64>,
    pub mean: Vec<f64>,
    pub max: Vec<f64>,
}

/// Knobs for one analysis pass, derived from CLI flags plus defaults.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Saturation threshold for windowing. Historical runs used both 0.9 and
    /// 0.96; the value is explicit so neither is a hidden constant.
    pub saturation_threshold: f64,
    /// Optimizer iteration budget.
    pub max_iterations: usize,
    /// Override for the optimizer starting point (defaults to bound midpoints).
    pub initial_guess: Option<[f64; 3]>,
    /// Index radius for midpoint-curve nearest-neighbor pairing.
    pub window_radius: usize,
    /// Bucket count for equilibration-step histograms.
    pub hist_buckets: usize,

    pub bounds: FitBounds,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            saturation_threshold: 0.96,
            max_iterations: 10_000,
            initial_guess: None,
            window_radius: 5,
            hist_buckets: 10,
            bounds: FitBounds::new([0.5, 1.0, 0.05], [2.0, 3.5, 1.0]),
            plot: true,
            plot_width: 100,
            plot_height: 30,
        }
    }
}
