//! Bounded nonlinear curve fitting.
//!
//! Responsibilities:
//!
//! - trim each curve to its well-conditioned window
//! - minimize squared residuals of the critical-exponent model under
//!   per-parameter box constraints
//! - surface every failure mode explicitly (empty window, under-determined
//!   data, non-convergence, bound saturation)

pub mod fitter;

pub use fitter::*;
