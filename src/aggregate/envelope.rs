//! Per-index envelope statistics over ragged sequences.
//!
//! Per-seed runs terminate at different lengths (each run equilibrates on its
//! own schedule), so truncating everything to the shortest run would discard
//! valid extremal data from the longer ones. Instead:
//!
//! - `mean` and `max` extend over the *union* of indices: every index where
//!   at least one run still has data contributes
//! - `min` extends only over the *intersection*: once any run ends, a
//!   per-index minimum over the survivors would not be a true lower envelope,
//!   so the min curve stops there
//!
//! The reference x-axis is taken from the longest run. This assumes all runs
//! share the same step/temperature schedule up to truncation length; the
//! assumption is documented here, not validated.

use crate::domain::EnvelopeCurve;
use crate::error::AnalysisError;
use crate::math::extrema_mean;

/// Aggregate a ragged collection of y-sequences into an envelope.
///
/// `reference_x` must come from the longest sequence; it is truncated to the
/// union length if longer.
pub fn aggregate(
    label: &str,
    sequences: &[Vec<f64>],
    reference_x: &[f64],
) -> Result<EnvelopeCurve, AnalysisError> {
    let longest = sequences.iter().map(Vec::len).max().unwrap_or(0);
    if longest == 0 {
        return Err(AnalysisError::EmptyGroup {
            label: label.to_string(),
        });
    }
    if reference_x.len() < longest {
        return Err(AnalysisError::MismatchedLength {
            left: reference_x.len(),
            right: longest,
        });
    }
    let shortest = sequences.iter().map(Vec::len).min().unwrap_or(0);

    let mut min = Vec::with_capacity(shortest);
    let mut mean = Vec::with_capacity(longest);
    let mut max = Vec::with_capacity(longest);
    let mut gathered = Vec::with_capacity(sequences.len());

    for i in 0..longest {
        gathered.clear();
        gathered.extend(sequences.iter().filter_map(|s| s.get(i)).copied());

        // `i < longest` guarantees at least one contributor.
        let (lo, avg, hi) = extrema_mean(&gathered).unwrap();
        mean.push(avg);
        max.push(hi);
        if i < shortest {
            min.push(lo);
        }
    }

    Ok(EnvelopeCurve {
        x: reference_x[..longest].to_vec(),
        min,
        mean,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences_have_zero_spread() {
        let seq = vec![1.0, 0.8, 0.5, 0.2];
        let sequences = vec![seq.clone(), seq.clone(), seq.clone()];
        let x: Vec<f64> = (0..4).map(|i| i as f64).collect();

        let env = aggregate("regular", &sequences, &x).unwrap();
        assert_eq!(env.min, seq);
        assert_eq!(env.mean, seq);
        assert_eq!(env.max, seq);
    }

    #[test]
    fn min_stops_at_the_shortest_run() {
        let sequences = vec![vec![1.0, 0.5, 0.2, 0.1], vec![2.0, 1.0]];
        let x: Vec<f64> = (0..4).map(|i| i as f64).collect();

        let env = aggregate("regular", &sequences, &x).unwrap();
        assert_eq!(env.min, vec![1.0, 0.5]);
        assert_eq!(env.mean, vec![1.5, 0.75, 0.2, 0.1]);
        assert_eq!(env.max, vec![2.0, 1.0, 0.2, 0.1]);
        assert_eq!(env.x.len(), 4);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = aggregate("irregular", &[], &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyGroup { .. }));
    }

    #[test]
    fn short_reference_axis_is_an_error() {
        let sequences = vec![vec![1.0, 0.5, 0.2]];
        let err = aggregate("regular", &sequences, &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::MismatchedLength { .. }));
    }
}
