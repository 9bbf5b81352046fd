//! `mag-curves` library crate.
//!
//! The binary (`mag`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future notebooks, batch drivers)
//! - code stays easy to navigate as the project grows

pub mod aggregate;
pub mod app;
pub mod classify;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod hist;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
