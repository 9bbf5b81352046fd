//! Fit-window selection for saturation curves.
//!
//! A magnetization sweep starts near its saturation value, decays through the
//! transition, and then crosses zero into noise. Neither end is useful for
//! fitting:
//!
//! - near-saturated samples (`y > threshold`) carry almost no information
//!   about the transition and can destabilize the optimizer
//! - samples at or past the zero crossing are overshoot/noise
//!
//! `slice_data` trims both ends and returns the contiguous range in between.

use crate::error::AnalysisError;

/// The half-open index range `[left_lim, pos_len)` selected for fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitWindow {
    /// First index past the saturated prefix (inclusive lower bound).
    pub left_lim: usize,
    /// Index of the first non-positive sample (exclusive upper bound).
    pub pos_len: usize,
}

impl FitWindow {
    pub fn len(&self) -> usize {
        self.pos_len - self.left_lim
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locate the fit window for `ys`.
///
/// Scans from the start while samples stay strictly positive; `pos_len` is
/// the count of that prefix. `left_lim` counts how many prefix samples exceed
/// `threshold`. An empty window is an explicit error, never a silent empty fit.
pub fn find_window(ys: &[f64], threshold: f64) -> Result<FitWindow, AnalysisError> {
    let mut pos_len = 0;
    let mut left_lim = 0;
    for &y in ys {
        if y <= 0.0 {
            break;
        }
        if y > threshold {
            left_lim += 1;
        }
        pos_len += 1;
    }

    let window = FitWindow { left_lim, pos_len };
    if window.is_empty() {
        return Err(AnalysisError::WindowEmpty { left_lim, pos_len });
    }
    Ok(window)
}

/// Window an `(xs, ys)` curve, returning the trimmed slices.
pub fn slice_data<'a>(
    xs: &'a [f64],
    ys: &'a [f64],
    threshold: f64,
) -> Result<(&'a [f64], &'a [f64]), AnalysisError> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::MismatchedLength {
            left: xs.len(),
            right: ys.len(),
        });
    }
    let w = find_window(ys, threshold)?;
    Ok((&xs[w.left_lim..w.pos_len], &ys[w.left_lim..w.pos_len]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 0.96;

    #[test]
    fn window_bounds_match_counts() {
        // Monotone decay from ~1 through 0 and below.
        let ys = [0.99, 0.98, 0.95, 0.7, 0.4, 0.1, -0.05, -0.2];
        let w = find_window(&ys, THRESHOLD).unwrap();
        assert_eq!(w.left_lim, ys.iter().filter(|&&y| y > THRESHOLD).count());
        assert_eq!(w.pos_len, 6); // first index where y <= 0
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn trailing_noise_after_zero_crossing_is_discarded() {
        // A positive rebound after the crossing must not re-open the window.
        let ys = [0.9, 0.4, -0.1, 0.3, 0.2];
        let w = find_window(&ys, THRESHOLD).unwrap();
        assert_eq!(w.pos_len, 2);
    }

    #[test]
    fn all_saturated_is_an_error() {
        let ys = [0.99, 0.98, 0.97];
        let err = find_window(&ys, THRESHOLD).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::WindowEmpty {
                left_lim: 3,
                pos_len: 3
            }
        ));
    }

    #[test]
    fn non_positive_first_sample_is_an_error() {
        let err = find_window(&[0.0, 0.5], THRESHOLD).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::WindowEmpty {
                left_lim: 0,
                pos_len: 0
            }
        ));
    }

    #[test]
    fn slice_data_returns_aligned_slices() {
        let xs = [1.0, 1.1, 1.2, 1.3, 1.4];
        let ys = [0.97, 0.8, 0.5, 0.1, -0.1];
        let (xw, yw) = slice_data(&xs, &ys, THRESHOLD).unwrap();
        assert_eq!(xw, &[1.1, 1.2, 1.3]);
        assert_eq!(yw, &[0.8, 0.5, 0.1]);
    }

    #[test]
    fn slice_data_rejects_misaligned_inputs() {
        let err = slice_data(&[1.0], &[0.5, 0.4], THRESHOLD).unwrap_err();
        assert!(matches!(err, AnalysisError::MismatchedLength { .. }));
    }
}
