//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads descriptors and data tables (or generates synthetic runs)
//! - classifies runs into topology groups
//! - runs the batch analysis pipeline
//! - prints reports/plots

use clap::Parser;
use log::info;

use crate::classify::{classify, default_specs, group_from_points, GroupSpec};
use crate::cli::{Command, DemoArgs, FitFlags, HysArgs, PhaseArgs, PlotFlags, RelaxArgs};
use crate::data::{generate_group, SampleSpec};
use crate::domain::{AnalysisConfig, FitBounds, Group};
use crate::error::AppError;
use crate::hist::bin_counts;
use crate::io::{load_data_point, load_descriptor, load_hys_table, load_relax_table, resolve_data_path};
use crate::math::groupby_min_positive;

pub mod pipeline;

/// Entry point for the `mag` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Phase(args) => handle_phase(args),
        Command::Relax(args) => handle_relax(args),
        Command::Hys(args) => handle_hys(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_phase(args: PhaseArgs) -> Result<(), AppError> {
    let config = analysis_config(&args.fit, &args.plot)?;

    let mut points = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        points.push(load_data_point(path)?);
    }

    let specs = if args.group.is_empty() {
        default_specs()
    } else {
        args.group
            .iter()
            .map(|s| GroupSpec::parse(s))
            .collect::<Result<Vec<_>, _>>()?
    };
    let groups = classify(points, &specs)?;
    for group in &groups {
        info!("group '{}': {} runs", group.label, group.data.len());
    }

    run_and_report(&groups, &config)
}

fn handle_relax(args: RelaxArgs) -> Result<(), AppError> {
    for path in &args.paths {
        let desc = load_descriptor(path)?;
        let data_path = resolve_data_path(path, &desc);
        let table = load_relax_table(&data_path)?;

        let (ts, etas) = groupby_min_positive(&table.temp, &table.eta);
        println!(
            "=== relax seed={} ({}): {} temperatures ===",
            desc.seed,
            data_path.display(),
            ts.len()
        );

        if !args.plot.no_plot {
            println!(
                "{}",
                crate::plot::render_fit_plot(&ts, &etas, None, args.plot.width, args.plot.height)
            );
        }

        let hist = bin_counts(&etas, args.bins, None);
        if !hist.is_empty() {
            println!("η distribution:");
            println!("{}", crate::report::format_histogram(&hist));
        }
    }
    Ok(())
}

fn handle_hys(args: HysArgs) -> Result<(), AppError> {
    for path in &args.paths {
        let table = load_hys_table(path)?;
        println!("=== hysteresis {} ===", path.display());
        if !args.plot.no_plot {
            println!(
                "{}",
                crate::plot::render_fit_plot(
                    &table.field,
                    &table.mag,
                    None,
                    args.plot.width,
                    args.plot.height
                )
            );
        }
    }
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = analysis_config(&args.fit, &args.plot)?;

    // Two synthetic topology classes with distinct transitions: regular
    // networks order at a higher temperature than irregular ones.
    let regular = SampleSpec {
        truth: [1.0, 2.45, 0.25],
        noise: args.noise,
        ..SampleSpec::default()
    };
    let irregular = SampleSpec {
        truth: [1.0, 1.93, 0.35],
        noise: args.noise,
        ..SampleSpec::default()
    };

    let groups = vec![
        group_from_points("regular", generate_group(&regular, &args.seeds)?),
        group_from_points("irregular", generate_group(&irregular, &args.seeds)?),
    ];

    run_and_report(&groups, &config)
}

fn run_and_report(groups: &[Group], config: &AnalysisConfig) -> Result<(), AppError> {
    let out = pipeline::run_phase(groups, config)?;

    for analysis in &out.groups {
        println!("{}", crate::report::format_group_summary(analysis));
        if config.plot {
            println!(
                "{}",
                crate::plot::render_group_plot(analysis, config.plot_width, config.plot_height)
            );
        }
    }

    println!("{}", crate::report::format_register_comparison(&out.register));
    Ok(())
}

fn analysis_config(fit: &FitFlags, plot: &PlotFlags) -> Result<AnalysisConfig, AppError> {
    let lower = triple(&fit.lower, "--lower")?;
    let upper = triple(&fit.upper, "--upper")?;
    for i in 0..3 {
        if !(lower[i].is_finite() && upper[i].is_finite() && lower[i] < upper[i]) {
            return Err(AppError::new(
                2,
                format!("Invalid bounds: lower={lower:?}, upper={upper:?}."),
            ));
        }
    }
    if !(fit.threshold.is_finite() && fit.threshold > 0.0) {
        return Err(AppError::new(2, "Saturation threshold must be positive."));
    }
    if fit.max_iterations == 0 {
        return Err(AppError::new(2, "Iteration budget must be > 0."));
    }

    let initial_guess = match &fit.initial_guess {
        Some(v) => Some(triple(v, "--initial-guess")?),
        None => None,
    };

    Ok(AnalysisConfig {
        saturation_threshold: fit.threshold,
        max_iterations: fit.max_iterations,
        initial_guess,
        window_radius: fit.radius,
        hist_buckets: fit.bins,
        bounds: FitBounds::new(lower, upper),
        plot: !plot.no_plot,
        plot_width: plot.width,
        plot_height: plot.height,
    })
}

fn triple(v: &[f64], flag: &str) -> Result<[f64; 3], AppError> {
    if v.len() != 3 {
        return Err(AppError::new(
            2,
            format!("{flag} expects exactly three values (m0,tc,beta)."),
        ));
    }
    Ok([v[0], v[1], v[2]])
}
