//! Combining ragged per-seed runs into group-level structures.
//!
//! Responsibilities:
//!
//! - per-index (min, mean, max) envelopes over variable-length sequences
//! - a representative midpoint curve derived from the envelope extremes
//! - the per-group accumulator of fitted parameter triples

pub mod envelope;
pub mod midpoint;
pub mod register;

pub use envelope::*;
pub use midpoint::*;
pub use register::*;
