//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Later series overdraw earlier ones, so callers list background series
//! (envelopes) first and the fitted curve last.

use crate::app::pipeline::GroupAnalysis;
use crate::domain::FitCurve;

/// One series of `(x, y)` points drawn with a single marker.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
    pub marker: char,
}

/// Render series onto a fixed character grid with a range header.
pub fn render(series: &[PlotSeries<'_>], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max, y_min, y_max)) = ranges(series) else {
        return "(no data to plot)\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let (x_min, x_max) = pad_range(x_min, x_max, 0.01);

    let mut grid = vec![vec![' '; width]; height];
    for s in series {
        for (&x, &y) in s.xs.iter().zip(s.ys.iter()) {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            let col = map_coord(x, x_min, x_max, width);
            let row = height - 1 - map_coord(y, y_min, y_max, height);
            grid[row][col] = s.marker;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));
    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Observed curve with its fit overlaid (`o` data, `-` fit).
pub fn render_fit_plot(
    xs: &[f64],
    ys: &[f64],
    fit: Option<&FitCurve>,
    width: usize,
    height: usize,
) -> String {
    let mut series = vec![PlotSeries {
        xs,
        ys,
        marker: 'o',
    }];
    if let Some(curve) = fit {
        series.push(PlotSeries {
            xs: &curve.xs,
            ys: &curve.ys,
            marker: '-',
        });
    }
    render(&series, width, height)
}

/// Group overview: envelope extremes (`.`), midpoint (`o`), consensus (`-`).
pub fn render_group_plot(analysis: &GroupAnalysis, width: usize, height: usize) -> String {
    let env = &analysis.envelope;
    let mut series = vec![
        PlotSeries {
            xs: &env.x[..env.min.len()],
            ys: &env.min,
            marker: '.',
        },
        PlotSeries {
            xs: &env.x[..env.max.len()],
            ys: &env.max,
            marker: '.',
        },
        PlotSeries {
            xs: &analysis.midpoint.0,
            ys: &analysis.midpoint.1,
            marker: 'o',
        },
    ];
    if let Some(curve) = &analysis.consensus {
        series.push(PlotSeries {
            xs: &curve.xs,
            ys: &curve.ys,
            marker: '-',
        });
    }
    render(&series, width, height)
}

fn ranges(series: &[PlotSeries<'_>]) -> Option<(f64, f64, f64, f64)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut any = false;

    for s in series {
        for (&x, &y) in s.xs.iter().zip(s.ys.iter()) {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            any = true;
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    any.then_some((x_min, x_max, y_min, y_max))
}

fn pad_range(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let span = (hi - lo).abs();
    let pad = if span > 0.0 { span * frac } else { lo.abs().max(1.0) * frac };
    (lo - pad, hi + pad)
}

fn map_coord(v: f64, lo: f64, hi: f64, cells: usize) -> usize {
    if hi <= lo {
        return 0;
    }
    let u = (v - lo) / (hi - lo);
    ((u * cells as f64) as usize).min(cells - 1)
}
