//! Key derivation
//!
//! Walks hierarchical derivation paths from a seed to derived keys.

mod derivation;

pub use derivation::*;
