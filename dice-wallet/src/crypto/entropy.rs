//! Entropy sources: system randomness, user-supplied hex, and dice rolls
//!
//! Dice rolls arrive as a D20 + d100 pair combined into `n = (d20-1)*100 +
//! d100`, giving a uniform value in 0..=1999. Values at or above
//! [`REJECTION_BOUND`] are rejected so that `n % 256` is an unbiased byte.

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::mnemonic::VALID_ENTROPY_LENGTHS;
use crate::error::{Error, Result};

/// Largest multiple of 256 not exceeding the 0..=1999 roll domain.
/// Rolls at or above this bound are rejected to eliminate modulo bias.
pub const REJECTION_BOUND: u16 = 256 * (2000 / 256);

/// Default number of entropy bytes to collect (128 bits, 12 words)
pub const DEFAULT_BYTES_NEEDED: usize = 16;

/// Generate cryptographically secure random entropy
pub fn random_entropy(length: usize) -> Result<Vec<u8>> {
    if !VALID_ENTROPY_LENGTHS.contains(&length) {
        return Err(Error::InvalidEntropyLength(length));
    }
    let mut entropy = vec![0u8; length];
    OsRng.fill_bytes(&mut entropy);
    Ok(entropy)
}

/// Decode a hex string into entropy bytes
///
/// An optional `0x`/`0X` prefix is stripped and the input is
/// lowercase-normalized before decoding.
pub fn entropy_from_hex(hex_string: &str) -> Result<Vec<u8>> {
    let normalized = normalize_hex(hex_string);

    if normalized.len() % 2 != 0 {
        return Err(Error::InvalidHexInput(
            "hex string must have even length".to_string(),
        ));
    }

    hex::decode(&normalized).map_err(|e| Error::InvalidHexInput(e.to_string()))
}

/// Validate hex input against an exact target byte length
pub fn validate_hex_input(hex_string: &str, expected_bytes: usize) -> Result<()> {
    let normalized = normalize_hex(hex_string);
    let expected_chars = expected_bytes * 2;

    if normalized.len() != expected_chars {
        return Err(Error::InvalidHexInput(format!(
            "expected exactly {} hex characters ({} bytes), got {}",
            expected_chars,
            expected_bytes,
            normalized.len()
        )));
    }

    if !normalized.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHexInput(
            "invalid hex characters (use only 0-9 and a-f)".to_string(),
        ));
    }

    Ok(())
}

fn normalize_hex(hex_string: &str) -> String {
    let trimmed = hex_string.trim().to_lowercase();
    trimmed
        .strip_prefix("0x")
        .unwrap_or(&trimmed)
        .to_string()
}

/// Result of processing a single dice roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResult {
    /// Combined roll value in 0..=1999
    pub roll_value: u16,
    /// Whether the roll fell below the rejection bound
    pub accepted: bool,
    /// The entropy byte produced, if accepted
    pub byte_value: Option<u8>,
}

/// Statistics over an entropy collection session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntropyStats {
    pub total_rolls: u64,
    pub accepted_rolls: u64,
    pub rejected_rolls: u64,
    pub bytes_collected: usize,
    pub bytes_needed: usize,
}

impl EntropyStats {
    pub fn is_complete(&self) -> bool {
        self.bytes_collected >= self.bytes_needed
    }

    pub fn progress_percent(&self) -> f64 {
        if self.bytes_needed == 0 {
            return 100.0;
        }
        (self.bytes_collected as f64 / self.bytes_needed as f64 * 100.0).min(100.0)
    }
}

/// Process a D20 + d100 roll pair
///
/// `n = (d20 - 1) * 100 + d100` maps the pair onto 0..=1999.
pub fn process_dice_roll(d20: u8, d100: u8) -> Result<DiceRollResult> {
    if !(1..=20).contains(&d20) {
        return Err(Error::OutOfRange(format!("D20 must be 1-20, got {}", d20)));
    }
    if d100 > 99 {
        return Err(Error::OutOfRange(format!("d100 must be 0-99, got {}", d100)));
    }

    let n = (u16::from(d20) - 1) * 100 + u16::from(d100);
    process_n_value(n)
}

/// Process a pre-combined roll value in 0..=1999
pub fn process_n_value(n: u16) -> Result<DiceRollResult> {
    if n > 1999 {
        return Err(Error::OutOfRange(format!("N must be 0-1999, got {}", n)));
    }

    if n < REJECTION_BOUND {
        Ok(DiceRollResult {
            roll_value: n,
            accepted: true,
            byte_value: Some((n % 256) as u8),
        })
    } else {
        Ok(DiceRollResult {
            roll_value: n,
            accepted: false,
            byte_value: None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectorState {
    Collecting,
    Complete,
}

/// Collects entropy bytes from dice rolls via rejection sampling
///
/// The collector starts in the collecting state and becomes complete once
/// the accepted-byte count reaches the target; further rolls are refused.
///
/// Not designed for concurrent access: exactly one logical caller drives a
/// collector to completion.
#[derive(Debug, Clone)]
pub struct DiceEntropyCollector {
    bytes_needed: usize,
    bytes: Vec<u8>,
    total_rolls: u64,
    rejected_rolls: u64,
    state: CollectorState,
}

impl Default for DiceEntropyCollector {
    fn default() -> Self {
        Self::new(DEFAULT_BYTES_NEEDED)
    }
}

impl DiceEntropyCollector {
    /// Create a collector targeting the given number of entropy bytes
    pub fn new(bytes_needed: usize) -> Self {
        let state = if bytes_needed == 0 {
            CollectorState::Complete
        } else {
            CollectorState::Collecting
        };
        Self {
            bytes_needed,
            bytes: Vec::with_capacity(bytes_needed),
            total_rolls: 0,
            rejected_rolls: 0,
            state,
        }
    }

    /// Whether the target byte count has been reached
    pub fn is_complete(&self) -> bool {
        self.state == CollectorState::Complete
    }

    /// Number of entropy bytes collected so far
    pub fn bytes_collected(&self) -> usize {
        self.bytes.len()
    }

    /// Target number of entropy bytes
    pub fn bytes_needed(&self) -> usize {
        self.bytes_needed
    }

    /// Current collection statistics
    pub fn stats(&self) -> EntropyStats {
        EntropyStats {
            total_rolls: self.total_rolls,
            accepted_rolls: self.bytes.len() as u64,
            rejected_rolls: self.rejected_rolls,
            bytes_collected: self.bytes.len(),
            bytes_needed: self.bytes_needed,
        }
    }

    /// Add a D20 + d100 roll pair
    pub fn add_roll(&mut self, d20: u8, d100: u8) -> Result<DiceRollResult> {
        if self.is_complete() {
            return Err(Error::CollectorAlreadyComplete);
        }
        let result = process_dice_roll(d20, d100)?;
        self.record(result);
        Ok(result)
    }

    /// Add a pre-combined roll value in 0..=1999
    pub fn add_n_value(&mut self, n: u16) -> Result<DiceRollResult> {
        if self.is_complete() {
            return Err(Error::CollectorAlreadyComplete);
        }
        let result = process_n_value(n)?;
        self.record(result);
        Ok(result)
    }

    fn record(&mut self, result: DiceRollResult) {
        self.total_rolls += 1;

        match result.byte_value {
            Some(byte) => {
                self.bytes.push(byte);
                if self.bytes.len() == self.bytes_needed {
                    self.state = CollectorState::Complete;
                    debug!(
                        total_rolls = self.total_rolls,
                        rejected_rolls = self.rejected_rolls,
                        bytes = self.bytes_needed,
                        "dice entropy collection complete"
                    );
                }
            }
            None => self.rejected_rolls += 1,
        }
    }

    /// Get the collected entropy bytes
    ///
    /// Fails unless the collector is complete.
    pub fn get_entropy(&self) -> Result<Vec<u8>> {
        if !self.is_complete() {
            return Err(Error::InsufficientEntropy {
                needed: self.bytes_needed,
                collected: self.bytes.len(),
            });
        }
        Ok(self.bytes[..self.bytes_needed].to_vec())
    }

    /// Reset the collector for a new session
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.total_rolls = 0;
        self.rejected_rolls = 0;
        self.state = if self.bytes_needed == 0 {
            CollectorState::Complete
        } else {
            CollectorState::Collecting
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::mnemonic::{entropy_to_mnemonic, validate_mnemonic};
    use crate::wordlist::Wordlist;

    #[test]
    fn test_rejection_bound_value() {
        assert_eq!(REJECTION_BOUND, 1792);
    }

    #[test]
    fn test_n_value_boundaries() {
        let result = process_n_value(0).unwrap();
        assert!(result.accepted);
        assert_eq!(result.byte_value, Some(0));

        let result = process_n_value(1791).unwrap();
        assert!(result.accepted);
        assert_eq!(result.byte_value, Some(255));

        let result = process_n_value(1792).unwrap();
        assert!(!result.accepted);
        assert_eq!(result.byte_value, None);

        let result = process_n_value(1999).unwrap();
        assert!(!result.accepted);

        assert!(matches!(process_n_value(2000), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_dice_roll_combination() {
        let result = process_dice_roll(1, 0).unwrap();
        assert_eq!(result.roll_value, 0);
        assert_eq!(result.byte_value, Some(0));

        let result = process_dice_roll(8, 91).unwrap();
        assert_eq!(result.roll_value, 791);
        assert_eq!(result.byte_value, Some(23));

        let result = process_dice_roll(18, 99).unwrap();
        assert_eq!(result.roll_value, 1799);
        assert!(!result.accepted);

        let result = process_dice_roll(20, 99).unwrap();
        assert_eq!(result.roll_value, 1999);
        assert!(!result.accepted);
    }

    #[test]
    fn test_dice_roll_out_of_range() {
        assert!(matches!(process_dice_roll(0, 0), Err(Error::OutOfRange(_))));
        assert!(matches!(process_dice_roll(21, 0), Err(Error::OutOfRange(_))));
        assert!(matches!(process_dice_roll(1, 100), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_collector_completion() {
        let mut collector = DiceEntropyCollector::new(16);
        assert!(matches!(
            collector.get_entropy(),
            Err(Error::InsufficientEntropy {
                needed: 16,
                collected: 0
            })
        ));

        for n in 0..16u16 {
            assert!(!collector.is_complete());
            collector.add_n_value(n).unwrap();
        }

        assert!(collector.is_complete());
        let entropy = collector.get_entropy().unwrap();
        assert_eq!(entropy, (0..16u8).collect::<Vec<u8>>());

        assert!(matches!(
            collector.add_n_value(0),
            Err(Error::CollectorAlreadyComplete)
        ));
        assert!(matches!(
            collector.add_roll(1, 0),
            Err(Error::CollectorAlreadyComplete)
        ));
    }

    #[test]
    fn test_collector_counts_rejections() {
        let mut collector = DiceEntropyCollector::new(2);
        collector.add_n_value(1792).unwrap();
        collector.add_n_value(1999).unwrap();
        collector.add_n_value(300).unwrap();
        collector.add_n_value(1791).unwrap();

        let stats = collector.stats();
        assert_eq!(stats.total_rolls, 4);
        assert_eq!(stats.accepted_rolls, 2);
        assert_eq!(stats.rejected_rolls, 2);
        assert_eq!(stats.bytes_collected, 2);
        assert!(stats.is_complete());
        assert_eq!(collector.get_entropy().unwrap(), vec![44u8, 255]); // 300 % 256, 1791 % 256
    }

    #[test]
    fn test_collector_out_of_range_does_not_count() {
        let mut collector = DiceEntropyCollector::new(2);
        assert!(collector.add_n_value(2000).is_err());
        assert_eq!(collector.stats().total_rolls, 0);
    }

    #[test]
    fn test_collector_reset() {
        let mut collector = DiceEntropyCollector::new(1);
        collector.add_n_value(42).unwrap();
        assert!(collector.is_complete());

        collector.reset();
        assert!(!collector.is_complete());
        let stats = collector.stats();
        assert_eq!(stats.total_rolls, 0);
        assert_eq!(stats.bytes_collected, 0);
        assert_eq!(stats.progress_percent(), 0.0);
    }

    #[test]
    fn test_collected_entropy_encodes_to_valid_mnemonic() {
        let mut collector = DiceEntropyCollector::default();
        let mut n = 0u16;
        while !collector.is_complete() {
            collector.add_n_value(n * 97 % 2000).unwrap();
            n += 1;
        }
        let entropy = collector.get_entropy().unwrap();
        assert_eq!(entropy.len(), 16);

        let wordlist = Wordlist::english();
        let mnemonic = entropy_to_mnemonic(&entropy, wordlist).unwrap();
        assert!(validate_mnemonic(&mnemonic, wordlist));
    }

    #[test]
    fn test_random_entropy() {
        let entropy = random_entropy(32).unwrap();
        assert_eq!(entropy.len(), 32);
        assert!(matches!(
            random_entropy(17),
            Err(Error::InvalidEntropyLength(17))
        ));
    }

    #[test]
    fn test_entropy_from_hex() {
        assert_eq!(
            entropy_from_hex("0x00ff").unwrap(),
            vec![0x00, 0xff]
        );
        assert_eq!(
            entropy_from_hex("0XDEADBEEF").unwrap(),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
        assert!(matches!(
            entropy_from_hex("abc"),
            Err(Error::InvalidHexInput(_))
        ));
        assert!(matches!(
            entropy_from_hex("zz"),
            Err(Error::InvalidHexInput(_))
        ));
    }

    #[test]
    fn test_validate_hex_input() {
        let hex32 = "00112233445566778899aabbccddeeff";
        assert!(validate_hex_input(hex32, 16).is_ok());
        assert!(validate_hex_input(&format!("0x{}", hex32), 16).is_ok());
        assert!(matches!(
            validate_hex_input("00ff", 16),
            Err(Error::InvalidHexInput(_))
        ));
        assert!(matches!(
            validate_hex_input("0011223344556677 899aabbccddeeffg", 16),
            Err(Error::InvalidHexInput(_))
        ));
    }

    #[test]
    fn test_zero_bytes_needed_is_complete() {
        let collector = DiceEntropyCollector::new(0);
        assert!(collector.is_complete());
        assert!(collector.get_entropy().unwrap().is_empty());
    }
}
