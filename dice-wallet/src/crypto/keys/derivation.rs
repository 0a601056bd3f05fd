//! Hierarchical key derivation chain
//!
//! Walks a BIP32-style derivation path from a BIP39 seed to an extended
//! key. Child derivation here deliberately uses the private-key formula
//! `HMAC-SHA512(chain_code, 0x00 || key || index)` for hardened and
//! non-hardened indices alike, and no elliptic-curve arithmetic is
//! performed. Derived keys and addresses are therefore not interoperable
//! with standard BIP32 wallets; a production wallet would derive the
//! secp256k1 public key for non-hardened children instead.

use std::fmt;
use std::str::FromStr;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::{Error, Result};

/// Offset marking an index as hardened
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key fixed by BIP32 for master key generation
const MASTER_KEY: &[u8] = b"Bitcoin seed";

/// A (key, chain code) pair produced at each derivation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedKey {
    /// 32-byte derived key
    pub key: [u8; 32],
    /// 32-byte chain code feeding the next derivation step
    pub chain_code: [u8; 32],
}

/// One component of a derivation path: an index below 2^31 plus a
/// hardened flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathComponent {
    pub index: u32,
    pub hardened: bool,
}

impl PathComponent {
    /// The child number actually fed into derivation (hardened indices
    /// are offset by 0x80000000)
    pub fn child_number(&self) -> u32 {
        if self.hardened {
            HARDENED_OFFSET + self.index
        } else {
            self.index
        }
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// A parsed derivation path, e.g. `m/44'/60'/0'/0/0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    components: Vec<PathComponent>,
}

impl DerivationPath {
    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        let mut parts = path.split('/');

        if parts.next() != Some("m") {
            return Err(Error::KeyDerivation(format!(
                "Invalid derivation path: {}",
                path
            )));
        }

        let mut components = Vec::new();
        for part in parts {
            if part.is_empty() {
                continue;
            }

            let (digits, hardened) = match part.strip_suffix('\'') {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            let index = digits.parse::<u32>().map_err(|_| {
                Error::KeyDerivation(format!("Invalid derivation path component: {}", part))
            })?;

            if index >= HARDENED_OFFSET {
                return Err(Error::KeyDerivation(format!(
                    "Derivation index too large: {}",
                    part
                )));
            }

            components.push(PathComponent { index, hardened });
        }

        Ok(Self { components })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(key)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;
    hmac.update(data);

    let mut out = [0u8; 64];
    out.copy_from_slice(&hmac.finalize().into_bytes());
    Ok(out)
}

/// Derive the master extended key from a seed
pub fn derive_master(seed: &[u8]) -> Result<ExtendedKey> {
    let h = hmac_sha512(MASTER_KEY, seed)?;

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&h[0..32]);
    chain_code.copy_from_slice(&h[32..64]);

    Ok(ExtendedKey { key, chain_code })
}

/// Derive a child extended key from a parent
///
/// `child_number` already carries the hardened offset where applicable;
/// the derivation data is the same for both cases (see module docs).
pub fn derive_child(parent: &ExtendedKey, child_number: u32) -> Result<ExtendedKey> {
    let mut data = Vec::with_capacity(37);
    data.push(0);
    data.extend_from_slice(&parent.key);
    data.extend_from_slice(&child_number.to_be_bytes());

    let h = hmac_sha512(&parent.chain_code, &data)?;

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&h[0..32]);
    chain_code.copy_from_slice(&h[32..64]);

    Ok(ExtendedKey { key, chain_code })
}

/// Walk a derivation path from a seed to the final extended key
pub fn derive_from_path(seed: &[u8], path: &DerivationPath) -> Result<ExtendedKey> {
    let mut extended = derive_master(seed)?;

    for component in path.components() {
        extended = derive_child(&extended, component.child_number())?;
    }

    Ok(extended)
}
