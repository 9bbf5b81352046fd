//! Grouping runs into topology classes.
//!
//! The simulator encodes the network type in its output paths
//! (`data/regular/phase/...`, `data/irregular/phase/...`), so classification
//! is a substring match of each run's data path against per-group patterns.
//! A run matching no pattern is a loader-contract violation and fails loudly.

use crate::domain::{DataPoint, Group};
use crate::error::AppError;

/// A `label=pattern` classification rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub label: String,
    pub pattern: String,
}

impl GroupSpec {
    /// Parse `label=pattern`; a bare `label` matches paths containing it.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        let (label, pattern) = match s.split_once('=') {
            Some((label, pattern)) => (label, pattern),
            None => (s, s),
        };
        if label.is_empty() || pattern.is_empty() {
            return Err(AppError::new(
                2,
                format!("Invalid group spec '{s}' (expected label=pattern)."),
            ));
        }
        Ok(GroupSpec {
            label: label.to_string(),
            pattern: pattern.to_string(),
        })
    }
}

/// The default comparison: regular vs irregular networks.
///
/// "irregular" is listed first because "regular" is a substring of it and
/// classification is first-match-wins.
pub fn default_specs() -> Vec<GroupSpec> {
    vec![
        GroupSpec {
            label: "irregular".to_string(),
            pattern: "irregular".to_string(),
        },
        GroupSpec {
            label: "regular".to_string(),
            pattern: "regular".to_string(),
        },
    ]
}

/// Partition runs into groups by matching their data paths.
///
/// Patterns are tried in order; the first spec whose pattern occurs in the
/// run's data path claims the run. Callers supplying overlapping patterns
/// must order them most-specific first.
pub fn classify(points: Vec<DataPoint>, specs: &[GroupSpec]) -> Result<Vec<Group>, AppError> {
    let mut groups: Vec<Group> = specs
        .iter()
        .map(|s| Group {
            label: s.label.clone(),
            pattern: s.pattern.clone(),
            data: Vec::new(),
        })
        .collect();

    for point in points {
        let path = point
            .desc
            .as_ref()
            .map(|d| d.data_path.display().to_string())
            .unwrap_or_default();
        let matched = specs.iter().position(|s| path.contains(&s.pattern));
        match matched {
            Some(i) => groups[i].data.push(point),
            None => {
                return Err(AppError::new(
                    2,
                    format!("Run (seed={}, path='{path}') matches no group pattern.", point.seed),
                ));
            }
        }
    }

    Ok(groups)
}

/// Convenience for tests and the demo: wrap pre-built points directly.
pub fn group_from_points(label: &str, points: Vec<DataPoint>) -> Group {
    Group {
        label: label.to_string(),
        pattern: label.to_string(),
        data: points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Descriptor, RunConfig};
    use std::path::PathBuf;

    fn point_with_path(seed: u64, path: &str) -> DataPoint {
        let mut p = DataPoint::new(vec![0.1], vec![0.9], vec![-1.0], vec![0.0], vec![1.0], seed)
            .unwrap();
        p.desc = Some(Descriptor {
            data_path: PathBuf::from(path),
            seed,
            deg_avg: 4.0,
            deg_mse: 0.0,
            config: RunConfig::default(),
        });
        p
    }

    #[test]
    fn regular_and_irregular_paths_do_not_cross_match() {
        let points = vec![
            point_with_path(1, "data/regular/phase/size=100/data.csv"),
            point_with_path(2, "data/irregular/phase/size=100/data.csv"),
        ];
        let groups = classify(points, &default_specs()).unwrap();

        assert_eq!(groups[0].label, "irregular");
        assert_eq!(groups[0].data.len(), 1);
        assert_eq!(groups[0].data[0].seed, 2);
        assert_eq!(groups[1].label, "regular");
        assert_eq!(groups[1].data[0].seed, 1);
    }

    #[test]
    fn unmatched_run_is_fatal() {
        let points = vec![point_with_path(3, "data/torus/phase/data.csv")];
        let err = classify(points, &default_specs()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn group_spec_parses_label_and_pattern() {
        let spec = GroupSpec::parse("reg=size=100").unwrap();
        assert_eq!(spec.label, "reg");
        assert_eq!(spec.pattern, "size=100");

        let bare = GroupSpec::parse("regular").unwrap();
        assert_eq!(bare.label, "regular");
        assert_eq!(bare.pattern, "regular");

        assert!(GroupSpec::parse("=x").is_err());
    }
}
