//! Representative midpoint curve from envelope extremes.
//!
//! The min and max envelope curves can be offset against each other: ragged
//! run lengths shift where each curve effectively samples the transition, so
//! pairing `min[i]` with `max[i]` can connect unrelated features. Instead we
//! pair each min point with its nearest max point inside a small index
//! window, which keeps the pairing physically local and the cost bounded at
//! `O(len(min) · radius)`.

use crate::error::AnalysisError;

/// Build the midpoint curve.
///
/// For each `p = (xs[i], min_curve[i])`, the nearest point `q` of
/// `max_curve` within indices `[i − radius, i + radius]` is selected by
/// Euclidean distance, and the arithmetic midpoint of `p` and `q` is emitted.
/// Output length equals `min_curve.len()`.
pub fn build(
    xs: &[f64],
    min_curve: &[f64],
    max_curve: &[f64],
    radius: usize,
) -> Result<(Vec<f64>, Vec<f64>), AnalysisError> {
    if xs.len() < max_curve.len() {
        return Err(AnalysisError::MismatchedLength {
            left: xs.len(),
            right: max_curve.len(),
        });
    }
    if min_curve.len() > max_curve.len() {
        return Err(AnalysisError::MismatchedLength {
            left: min_curve.len(),
            right: max_curve.len(),
        });
    }

    let mut out_x = Vec::with_capacity(min_curve.len());
    let mut out_y = Vec::with_capacity(min_curve.len());

    for (i, &y_min) in min_curve.iter().enumerate() {
        let p = (xs[i], y_min);

        let lo = i.saturating_sub(radius);
        let hi = (i + radius + 1).min(max_curve.len());

        let mut best = (xs[i], max_curve[i.min(max_curve.len() - 1)]);
        let mut best_d2 = f64::INFINITY;
        for j in lo..hi {
            let q = (xs[j], max_curve[j]);
            let d2 = (q.0 - p.0).powi(2) + (q.1 - p.1).powi(2);
            if d2 < best_d2 {
                best_d2 = d2;
                best = q;
            }
        }

        out_x.push((p.0 + best.0) / 2.0);
        out_y.push((p.1 + best.1) / 2.0);
    }

    Ok((out_x, out_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_curves_map_to_themselves() {
        let xs: Vec<f64> = (0..6).map(|i| i as f64 * 0.5).collect();
        let curve = vec![1.0, 0.9, 0.7, 0.4, 0.2, 0.05];

        let (mx, my) = build(&xs, &curve, &curve, 3).unwrap();
        assert_eq!(mx, xs);
        assert_eq!(my, curve);
    }

    #[test]
    fn output_length_matches_min_curve() {
        let xs: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let min_curve = vec![1.0, 0.8, 0.6];
        let max_curve = vec![1.2, 1.0, 0.8, 0.6, 0.4, 0.2, 0.1, 0.05];

        let (mx, my) = build(&xs, &min_curve, &max_curve, 2).unwrap();
        assert_eq!(mx.len(), 3);
        assert_eq!(my.len(), 3);
    }

    #[test]
    fn offset_curves_pair_locally() {
        // max is min shifted by one index. With tight x-spacing the y-offset
        // dominates the distance, so each min point pairs with the
        // equal-valued max point one step over instead of its own index.
        let xs: Vec<f64> = (0..5).map(|i| i as f64 * 0.01).collect();
        let min_curve = vec![0.9, 0.7, 0.5, 0.3];
        let max_curve = vec![1.1, 0.9, 0.7, 0.5, 0.3];

        let (mx, my) = build(&xs, &min_curve, &max_curve, 1).unwrap();
        assert_eq!(my[0], 0.9);
        assert!((mx[0] - 0.005).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_pairs_same_index() {
        let xs = vec![0.0, 1.0, 2.0];
        let min_curve = vec![0.8, 0.5, 0.2];
        let max_curve = vec![1.0, 0.7, 0.4];

        let (_, my) = build(&xs, &min_curve, &max_curve, 0).unwrap();
        for (got, expect) in my.iter().zip([0.9, 0.6, 0.3]) {
            assert!((got - expect).abs() < 1e-12);
        }
    }

    #[test]
    fn min_longer_than_max_is_an_error() {
        let xs = vec![0.0, 1.0, 2.0];
        let err = build(&xs, &[1.0, 0.5, 0.2], &[1.0, 0.5], 1).unwrap_err();
        assert!(matches!(err, AnalysisError::MismatchedLength { .. }));
    }
}
