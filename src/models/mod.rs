//! Critical-exponent model implementation.
//!
//! The model is a small, pure function so fitting and plotting code can stay
//! generic over parameter triples.

pub mod model;

pub use model::*;
