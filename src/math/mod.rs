//! Mathematical utilities: fit windowing, bounded least squares, scalar stats.

pub mod lsq;
pub mod stats;
pub mod window;

pub use lsq::*;
pub use stats::*;
pub use window::*;
