//! Per-group accumulator of fitted parameter triples.
//!
//! The register is append-only and owned by the single sequential batch pass;
//! no locking is needed. Failed fits are never recorded — the caller decides
//! to log-and-skip or abort before reaching this point.

use std::collections::BTreeMap;

use crate::error::AnalysisError;
use crate::math::mean;

/// Arithmetic means of one group's recorded triples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSummary {
    pub m0: f64,
    pub tc: f64,
    pub beta: f64,
}

#[derive(Debug, Clone, Default)]
struct GroupParams {
    m0: Vec<f64>,
    tc: Vec<f64>,
    beta: Vec<f64>,
}

/// Accumulates per-run fitted triples per group label.
#[derive(Debug, Clone, Default)]
pub struct ParamRegister {
    groups: BTreeMap<String, GroupParams>,
}

impl ParamRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one successful fit to the group's lists.
    pub fn record(&mut self, label: &str, m0: f64, tc: f64, beta: f64) {
        let entry = self.groups.entry(label.to_string()).or_default();
        entry.m0.push(m0);
        entry.tc.push(tc);
        entry.beta.push(beta);
    }

    /// Number of recorded triples for a group.
    pub fn count(&self, label: &str) -> usize {
        self.groups.get(label).map_or(0, |g| g.m0.len())
    }

    /// Mean triple for a group. Unknown or empty groups are an error.
    pub fn summary(&self, label: &str) -> Result<ParamSummary, AnalysisError> {
        let group = self
            .groups
            .get(label)
            .ok_or_else(|| AnalysisError::EmptyGroup {
                label: label.to_string(),
            })?;

        match (mean(&group.m0), mean(&group.tc), mean(&group.beta)) {
            (Some(m0), Some(tc), Some(beta)) => Ok(ParamSummary { m0, tc, beta }),
            _ => Err(AnalysisError::EmptyGroup {
                label: label.to_string(),
            }),
        }
    }

    /// Per-group `(label, run count, mean triple)` in sorted label order.
    ///
    /// `record` always pushes all three lists, so every stored group has a
    /// mean; nothing is skipped.
    pub fn summaries(&self) -> impl Iterator<Item = (&str, usize, ParamSummary)> + '_ {
        self.groups.iter().filter_map(|(label, g)| {
            let (m0, tc, beta) = (mean(&g.m0)?, mean(&g.tc)?, mean(&g.beta)?);
            Some((label.as_str(), g.m0.len(), ParamSummary { m0, tc, beta }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_the_mean_of_recorded_triples() {
        let mut reg = ParamRegister::new();
        reg.record("regular", 1.0, 2.2, 0.25);
        reg.record("regular", 1.2, 2.0, 0.35);

        let s = reg.summary("regular").unwrap();
        assert!((s.m0 - 1.1).abs() < 1e-12);
        assert!((s.tc - 2.1).abs() < 1e-12);
        assert!((s.beta - 0.3).abs() < 1e-12);
        assert_eq!(reg.count("regular"), 2);
    }

    #[test]
    fn unknown_group_is_an_error() {
        let reg = ParamRegister::new();
        let err = reg.summary("irregular").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyGroup { .. }));
    }

    #[test]
    fn groups_accumulate_independently() {
        let mut reg = ParamRegister::new();
        reg.record("regular", 1.0, 2.2, 0.25);
        reg.record("irregular", 1.0, 1.9, 0.4);

        assert_eq!(reg.count("regular"), 1);
        assert_eq!(reg.count("irregular"), 1);

        let listed: Vec<(&str, usize)> = reg.summaries().map(|(l, n, _)| (l, n)).collect();
        assert_eq!(listed, vec![("irregular", 1), ("regular", 1)]);
    }
}
