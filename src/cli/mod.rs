//! Command-line parsing for the spin-model analysis tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code. The original analysis
//! scripts dispatched on a mode string ("hys"/"phase"/"relax"); here each
//! mode is a proper subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "mag",
    version,
    about = "Critical-phenomena analysis for lattice spin-model simulations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze phase sweeps: per-seed fits, group envelopes, consensus fits.
    Phase(PhaseArgs),
    /// Plot per-temperature relaxation minima (η) for each run.
    Relax(RelaxArgs),
    /// Plot hysteresis loops (H vs M).
    Hys(HysArgs),
    /// Run the phase pipeline on synthetic data (no simulator output needed).
    Demo(DemoArgs),
}

/// Options shared by every fitting command.
#[derive(Debug, Parser, Clone)]
pub struct FitFlags {
    /// Saturation threshold for windowing; samples above it are dropped.
    #[arg(long, default_value_t = 0.96)]
    pub threshold: f64,

    /// Optimizer iteration budget.
    #[arg(long, default_value_t = 10_000)]
    pub max_iterations: usize,

    /// Optimizer starting point as `m0,tc,beta` (default: bound midpoints).
    #[arg(long, value_delimiter = ',')]
    pub initial_guess: Option<Vec<f64>>,

    /// Lower bounds as `m0,tc,beta`.
    #[arg(long, value_delimiter = ',', default_value = "0.5,1.0,0.05")]
    pub lower: Vec<f64>,

    /// Upper bounds as `m0,tc,beta`.
    #[arg(long, value_delimiter = ',', default_value = "2.0,3.5,1.0")]
    pub upper: Vec<f64>,

    /// Index radius for midpoint-curve nearest-neighbor pairing.
    #[arg(long, default_value_t = 5)]
    pub radius: usize,

    /// Bucket count for equilibration-step histograms.
    #[arg(long, default_value_t = 10)]
    pub bins: usize,
}

/// Options shared by every plotting command.
#[derive(Debug, Parser, Clone)]
pub struct PlotFlags {
    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 30)]
    pub height: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct PhaseArgs {
    /// Run descriptor files (`desc.json`), one per seed.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Group rules as `label=pattern` matched against data paths.
    /// Defaults to the regular/irregular comparison.
    #[arg(long)]
    pub group: Vec<String>,

    #[command(flatten)]
    pub fit: FitFlags,

    #[command(flatten)]
    pub plot: PlotFlags,
}

#[derive(Debug, Parser, Clone)]
pub struct RelaxArgs {
    /// Run descriptor files (`desc.json`).
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Bucket count for the η histogram.
    #[arg(long, default_value_t = 10)]
    pub bins: usize,

    #[command(flatten)]
    pub plot: PlotFlags,
}

#[derive(Debug, Parser, Clone)]
pub struct HysArgs {
    /// Hysteresis data tables (CSV with `H,M` columns).
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub plot: PlotFlags,
}

#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Seeds per synthetic group.
    #[arg(long, value_delimiter = ',', default_value = "1,2,3")]
    pub seeds: Vec<u64>,

    /// Noise standard deviation for the synthetic curves.
    #[arg(long, default_value_t = 0.005)]
    pub noise: f64,

    #[command(flatten)]
    pub fit: FitFlags,

    #[command(flatten)]
    pub plot: PlotFlags,
}
