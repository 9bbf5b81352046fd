//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - simulation run data (`DataPoint`, `Group`, `Descriptor`)
//! - fit configuration (`FitBounds`, `AnalysisConfig`)
//! - fit and aggregation outputs (`FitCurve`, `EnvelopeCurve`)

pub mod types;

pub use types::*;
