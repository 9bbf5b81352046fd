//! Fixed-width histogram bucketing that preserves bucket membership.
//!
//! The domain `[min, max]` is split into `bucket_count` equal-width half-open
//! intervals `[lo, hi)`. Because every interval is half-open, a value exactly
//! equal to the top bound falls outside every bucket; callers that need the
//! maximum included must widen the top bound themselves. This is deliberate
//! and covered by tests rather than papered over with a special case.

/// One half-open bucket interval `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
}

impl Bin {
    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v < self.hi
    }
}

/// Bucket `(value, payload)` pairs into `bucket_count` equal-width bins.
///
/// `bounds` defaults to the data's own (min, max) when `None`. Values outside
/// the domain (including the exact maximum) are dropped. Returns an empty
/// vector when there is no data or `bucket_count` is zero.
pub fn bin<T>(
    pairs: Vec<(f64, T)>,
    bucket_count: usize,
    bounds: Option<(f64, f64)>,
) -> Vec<(Bin, Vec<T>)> {
    if pairs.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let (lo, hi) = bounds.unwrap_or_else(|| {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (v, _) in &pairs {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        (lo, hi)
    });
    if !(lo.is_finite() && hi.is_finite() && hi > lo) {
        return Vec::new();
    }

    let width = (hi - lo) / bucket_count as f64;
    let mut buckets: Vec<(Bin, Vec<T>)> = (0..bucket_count)
        .map(|i| {
            (
                Bin {
                    lo: lo + width * i as f64,
                    hi: lo + width * (i + 1) as f64,
                },
                Vec::new(),
            )
        })
        .collect();

    for (v, payload) in pairs {
        // First interval containing the value; at most one, since the bins
        // partition the domain.
        if let Some((_, members)) = buckets.iter_mut().find(|(bin, _)| bin.contains(v)) {
            members.push(payload);
        }
    }

    buckets
}

/// Convenience: counts only.
pub fn bin_counts(values: &[f64], bucket_count: usize, bounds: Option<(f64, f64)>) -> Vec<(Bin, usize)> {
    bin(values.iter().map(|&v| (v, ())).collect(), bucket_count, bounds)
        .into_iter()
        .map(|(bin, members)| (bin, members.len()))
        .collect()
}
