//! Loading simulator output: JSON run descriptors and CSV data tables.

pub mod descriptor;
pub mod table;

pub use descriptor::*;
pub use table::*;
