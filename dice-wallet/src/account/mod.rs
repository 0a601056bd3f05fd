//! Wallet derivation
//!
//! This module assembles per-chain wallet records from a mnemonic phrase.

mod wallet;

pub use wallet::*;
