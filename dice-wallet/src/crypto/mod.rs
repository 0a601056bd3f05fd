//! Cryptographic primitives and operations
//!
//! This module provides functionality for entropy collection, mnemonic
//! encoding, seed stretching, key derivation, and address encoding.

pub mod address;
pub mod entropy;
pub mod keys;
pub mod mnemonic;

pub use address::*;
pub use entropy::*;
pub use keys::*;
pub use mnemonic::*;
