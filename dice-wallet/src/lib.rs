//! Dice Wallet Core - BIP39 mnemonic and HD wallet toolkit
//!
//! This library turns an entropy source (system CSPRNG, user-supplied hex,
//! or physical dice rolls consumed via rejection sampling) into a BIP39
//! mnemonic phrase, and derives hierarchical wallet keys and addresses
//! from it. It is designed for offline use: no operation performs network
//! or blocking I/O, and nothing is persisted.
//!
//! Address derivation is deliberately simplified (no elliptic-curve
//! public-key derivation); see `crypto::keys::derivation` before assuming
//! interoperability with standard wallets.

pub mod account;
pub mod crypto;
pub mod error;
pub mod wordlist;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use wordlist::Wordlist;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
