//! Mnemonic phrase encoding, validation and seed derivation
//!
//! Implements the BIP39 entropy-to-mnemonic codec against a caller-supplied
//! [`Wordlist`], plus PBKDF2 seed stretching and display helpers.

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};
use crate::wordlist::Wordlist;

/// Entropy lengths accepted by the codec, in bytes (128..256 bits)
pub const VALID_ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Word counts of well-formed mnemonics
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// PBKDF2 iteration count fixed by BIP39
const SEED_ITERATIONS: u32 = 2048;

/// Placeholder shown instead of a real word when masking a phrase
const MASK_TOKEN: &str = "████";

/// Convert entropy bytes to a mnemonic phrase
///
/// The entropy bits are extended with the first `len/4` bits of their
/// SHA-256 digest, and the combined stream is split into 11-bit groups,
/// each indexing a word in the wordlist.
pub fn entropy_to_mnemonic(entropy: &[u8], wordlist: &Wordlist) -> Result<String> {
    if !VALID_ENTROPY_LENGTHS.contains(&entropy.len()) {
        return Err(Error::InvalidEntropyLength(entropy.len()));
    }

    let checksum_len = entropy.len() * 8 / 32;
    let hash = Sha256::digest(entropy);

    let mut bits = Vec::with_capacity(entropy.len() * 8 + checksum_len);
    for byte in entropy {
        for i in 0..8 {
            bits.push((byte >> (7 - i)) & 1 == 1);
        }
    }
    for i in 0..checksum_len {
        bits.push((hash[i / 8] >> (7 - (i % 8))) & 1 == 1);
    }

    let mut words = Vec::with_capacity(bits.len() / 11);
    for chunk in bits.chunks(11) {
        let mut index: u16 = 0;
        for (i, &bit) in chunk.iter().enumerate() {
            if bit {
                index |= 1 << (10 - i);
            }
        }
        words.push(wordlist.word(index));
    }

    Ok(words.join(" "))
}

/// Validate a mnemonic phrase against a wordlist
///
/// Returns false (never errors) on a bad word count, a word missing from
/// the wordlist, or a checksum mismatch.
pub fn validate_mnemonic(mnemonic: &str, wordlist: &Wordlist) -> bool {
    let words: Vec<&str> = mnemonic.split_whitespace().collect();

    if !VALID_WORD_COUNTS.contains(&words.len()) {
        return false;
    }

    let mut bits = Vec::with_capacity(words.len() * 11);
    for word in &words {
        match wordlist.index_of(word) {
            Some(index) => {
                for i in 0..11 {
                    bits.push((index >> (10 - i)) & 1 == 1);
                }
            }
            None => return false,
        }
    }

    let entropy_len = words.len() * 11 * 32 / 33;
    let checksum_len = bits.len() - entropy_len;

    let mut entropy = vec![0u8; entropy_len / 8];
    for (i, &bit) in bits[..entropy_len].iter().enumerate() {
        if bit {
            entropy[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    let hash = Sha256::digest(&entropy);
    for i in 0..checksum_len {
        let expected = (hash[i / 8] >> (7 - (i % 8))) & 1 == 1;
        if bits[entropy_len + i] != expected {
            return false;
        }
    }

    true
}

/// Derive the 64-byte BIP39 seed from a mnemonic phrase and passphrase
///
/// PBKDF2-HMAC-SHA512 with salt `"mnemonic" + passphrase` and 2048
/// iterations. Deterministic for well-formed string inputs.
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> [u8; 64] {
    let salt = format!("mnemonic{}", passphrase);
    let mut seed = [0u8; 64];
    pbkdf2_hmac::<Sha512>(
        mnemonic.as_bytes(),
        salt.as_bytes(),
        SEED_ITERATIONS,
        &mut seed,
    );
    seed
}

/// Mnemonic word count for a given entropy byte length
pub fn word_count_for_entropy(entropy_bytes: usize) -> Option<usize> {
    match entropy_bytes {
        16 => Some(12),
        20 => Some(15),
        24 => Some(18),
        28 => Some(21),
        32 => Some(24),
        _ => None,
    }
}

/// Entropy byte length for a given mnemonic word count
pub fn entropy_bytes_for_word_count(word_count: usize) -> Option<usize> {
    match word_count {
        12 => Some(16),
        15 => Some(20),
        18 => Some(24),
        21 => Some(28),
        24 => Some(32),
        _ => None,
    }
}

/// Replace every word of a mnemonic with a fixed placeholder token
///
/// Used for display; never echoes partial characters of real words.
pub fn mask_mnemonic(mnemonic: &str) -> String {
    mnemonic
        .split_whitespace()
        .map(|_| MASK_TOKEN)
        .collect::<Vec<_>>()
        .join(" ")
}
