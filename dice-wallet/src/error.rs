//! Error types for the dice-wallet library

use thiserror::Error;

/// Custom error type for dice-wallet operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Entropy length must be 16, 20, 24, 28 or 32 bytes, got {0}")]
    InvalidEntropyLength(usize),

    #[error("Invalid hex input: {0}")]
    InvalidHexInput(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Entropy collection already complete")]
    CollectorAlreadyComplete,

    #[error("Insufficient entropy: need {needed} bytes, only have {collected}")]
    InsufficientEntropy { needed: usize, collected: usize },

    #[error("Wordlist must contain exactly 2048 unique words, got {0}")]
    WordlistSizeMismatch(usize),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Wordlist file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dice-wallet operations
pub type Result<T> = std::result::Result<T, Error>;
