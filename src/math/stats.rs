//! Small scalar statistics helpers shared by aggregation and reporting.

/// Arithmetic mean. `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// One-pass (min, mean, max) over a non-empty set of values.
pub fn extrema_mean(values: &[f64]) -> Option<(f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let (mut lo, mut sum, mut hi) = (f64::INFINITY, 0.0, f64::NEG_INFINITY);
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
        sum += v;
    }
    // Constant input must aggregate exactly; `sum / n` rounds (e.g. three
    // 0.8s average to 0.8000000000000002).
    let avg = if lo == hi { lo } else { sum / values.len() as f64 };
    Some((lo, avg, hi))
}

/// Reduce consecutive runs of equal keys to their minimum value, keeping
/// only strictly positive minima.
///
/// Relaxation tables repeat each temperature once per sweep; the relevant
/// observable per temperature is the smallest positive η reached.
pub fn groupby_min_positive(keys: &[f64], values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut out_k = Vec::new();
    let mut out_v = Vec::new();

    let mut i = 0;
    while i < keys.len().min(values.len()) {
        let key = keys[i];
        let mut lo = values[i];
        let mut j = i + 1;
        while j < keys.len().min(values.len()) && keys[j] == key {
            lo = lo.min(values[j]);
            j += 1;
        }
        if lo > 0.0 {
            out_k.push(key);
            out_v.push(lo);
        }
        i = j;
    }

    (out_k, out_v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn groupby_min_keeps_positive_minima_per_key() {
        let keys = [0.5, 0.5, 0.5, 0.6, 0.6, 0.7];
        let vals = [0.03, 0.01, 0.02, 0.05, -0.01, 0.04];
        let (k, v) = groupby_min_positive(&keys, &vals);
        // 0.6's minimum is negative and is dropped entirely.
        assert_eq!(k, vec![0.5, 0.7]);
        assert_eq!(v, vec![0.01, 0.04]);
    }

    #[test]
    fn extrema_mean_is_exact_on_constant_input() {
        assert_eq!(extrema_mean(&[0.8, 0.8, 0.8]), Some((0.8, 0.8, 0.8)));
    }

    #[test]
    fn extrema_mean_sweep() {
        let (lo, avg, hi) = extrema_mean(&[2.0, -1.0, 4.0, 3.0]).unwrap();
        assert_eq!(lo, -1.0);
        assert_eq!(hi, 4.0);
        assert!((avg - 2.0).abs() < 1e-12);
    }
}
