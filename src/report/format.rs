//! Reporting utilities: per-group tables and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::aggregate::ParamRegister;
use crate::app::pipeline::GroupAnalysis;
use crate::hist::Bin;

/// Format the full analysis of one group.
pub fn format_group_summary(analysis: &GroupAnalysis) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== group '{}' ===\n", analysis.label));
    out.push_str(&format!(
        "Runs: {} fitted, {} skipped\n",
        analysis.seed_fits.len(),
        analysis.skipped.len()
    ));

    out.push_str("\nPer-seed fits:\n");
    out.push_str(&format!(
        "{:>8} {:>10} {:>10} {:>10} {:>8}\n",
        "seed", "M_0", "T_C", "β", "window"
    ));
    for (seed, curve) in &analysis.seed_fits {
        out.push_str(&format!(
            "{:>8} {:>10.4} {:>10.4} {:>10.4} {:>8}\n",
            seed,
            curve.m0,
            curve.tc,
            curve.beta,
            curve.xs.len()
        ));
    }
    for (seed, err) in &analysis.skipped {
        out.push_str(&format!("{seed:>8} (skipped) {err}\n"));
    }

    out.push_str("\nConsensus fit (envelope midpoint):\n");
    match &analysis.consensus {
        Some(curve) => out.push_str(&format!(
            "- fit(M_0={:.4}, T_C={:.4}, β={:.4}) over {} points\n",
            curve.m0,
            curve.tc,
            curve.beta,
            curve.xs.len()
        )),
        None => out.push_str("- (failed)\n"),
    }

    if let Some(summary) = &analysis.summary {
        out.push_str(&format!(
            "\nGroup means: M_0={:.4}, T_C={:.4}, β={:.4}\n",
            summary.m0, summary.tc, summary.beta
        ));
    }

    if !analysis.eq_hist.is_empty() {
        out.push_str("\nEquilibration steps:\n");
        out.push_str(&format_histogram(&analysis.eq_hist));
    }

    out
}

/// Compare group means side by side.
pub fn format_register_comparison(register: &ParamRegister) -> String {
    let mut out = String::new();
    out.push_str("=== group comparison ===\n");
    out.push_str(&format!(
        "{:<12} {:>6} {:>10} {:>10} {:>10}\n",
        "group", "runs", "M_0", "T_C", "β"
    ));
    for (label, runs, s) in register.summaries() {
        out.push_str(&format!(
            "{:<12} {:>6} {:>10.4} {:>10.4} {:>10.4}\n",
            label, runs, s.m0, s.tc, s.beta
        ));
    }
    out
}

/// Render a counts histogram as interval rows plus a proportional bar.
pub fn format_histogram(hist: &[(Bin, usize)]) -> String {
    let mut out = String::new();
    let peak = hist.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    for (bin, count) in hist {
        let bar_len = (count * 40) / peak;
        out.push_str(&format!(
            "[{:>9.2}, {:>9.2}) {:>6} {}\n",
            bin.lo,
            bin.hi,
            count,
            "#".repeat(bar_len)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EnvelopeCurve, FitCurve};
    use crate::error::AnalysisError;

    fn dummy_analysis() -> GroupAnalysis {
        let curve = FitCurve {
            m0: 1.0,
            tc: 2.2,
            beta: 0.25,
            xs: vec![1.0, 1.5, 2.0],
            ys: vec![0.8, 0.6, 0.3],
        };
        GroupAnalysis {
            label: "regular".to_string(),
            seed_fits: vec![(1, curve.clone())],
            skipped: vec![(2, AnalysisError::TooFewPoints { n: 1 })],
            envelope: EnvelopeCurve {
                x: vec![1.0, 1.5, 2.0],
                min: vec![0.7, 0.5, 0.2],
                mean: vec![0.8, 0.6, 0.3],
                max: vec![0.9, 0.7, 0.4],
            },
            midpoint: (vec![1.0, 1.5, 2.0], vec![0.8, 0.6, 0.3]),
            consensus: Some(curve),
            summary: None,
            eq_hist: vec![
                (Bin { lo: 40.0, hi: 50.0 }, 3),
                (Bin { lo: 50.0, hi: 60.0 }, 1),
            ],
        }
    }

    #[test]
    fn group_summary_mentions_seeds_and_failures() {
        let text = format_group_summary(&dummy_analysis());
        assert!(text.contains("group 'regular'"));
        assert!(text.contains("1 fitted, 1 skipped"));
        assert!(text.contains("T_C=2.2"));
        assert!(text.contains("under-determined"));
    }

    #[test]
    fn comparison_lists_every_recorded_group() {
        let mut reg = ParamRegister::new();
        reg.record("regular", 1.0, 2.2, 0.25);
        reg.record("irregular", 1.0, 1.9, 0.4);

        let text = format_register_comparison(&reg);
        assert!(text.contains("regular"));
        assert!(text.contains("irregular"));
        assert!(text.contains("2.2000"));
        assert!(text.contains("1.9000"));
    }

    #[test]
    fn histogram_rows_scale_to_the_peak() {
        let hist = vec![
            (Bin { lo: 0.0, hi: 1.0 }, 4),
            (Bin { lo: 1.0, hi: 2.0 }, 2),
        ];
        let text = format_histogram(&hist);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].matches('#').count(), 40);
        assert_eq!(lines[1].matches('#').count(), 20);
    }
}
