//! Address encoding for derived keys
//!
//! Both schemes hash the derived key bytes directly; no elliptic-curve
//! public key is derived first (see `crypto::keys::derivation`).

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Version byte for Bitcoin mainnet P2PKH addresses
pub const BITCOIN_MAINNET_VERSION: u8 = 0x00;

/// How a chain formats its address strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressScheme {
    /// Base58Check over a versioned RIPEMD160(SHA256(key)) hash
    Base58Check { version: u8 },
    /// `0x`-prefixed hex of the last 20 bytes of SHA256(key)
    HashHex,
}

impl AddressScheme {
    /// Encode a derived key as an address string
    pub fn encode(&self, key: &[u8]) -> String {
        match self {
            Self::Base58Check { version } => base58check_address(key, *version),
            Self::HashHex => hash_hex_address(key),
        }
    }
}

fn base58check_address(key: &[u8], version: u8) -> String {
    let sha = Sha256::digest(key);
    let pubkey_hash = Ripemd160::digest(sha);

    let mut payload = Vec::with_capacity(25);
    payload.push(version);
    payload.extend_from_slice(&pubkey_hash);

    let checksum = Sha256::digest(Sha256::digest(&payload));
    payload.extend_from_slice(&checksum[0..4]);

    bs58::encode(payload).into_string()
}

fn hash_hex_address(key: &[u8]) -> String {
    let hash = Sha256::digest(key);
    format!("0x{}", hex::encode(&hash[hash.len() - 20..]))
}
