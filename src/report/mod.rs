//! Formatted terminal output for batch runs.

pub mod format;

pub use format::*;
