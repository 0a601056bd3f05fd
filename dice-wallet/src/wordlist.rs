//! BIP39 wordlist loading and lookup
//!
//! A wordlist is an ordered, duplicate-free table of exactly 2048 words.
//! It is loaded once and shared read-only with the codec and validation
//! functions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Number of words a BIP39 wordlist must contain
pub const WORDLIST_SIZE: usize = 2048;

const ENGLISH: &str = include_str!("../data/english.txt");

static ENGLISH_WORDLIST: OnceLock<Wordlist> = OnceLock::new();

/// An ordered, duplicate-free BIP39 wordlist with lookup in both directions
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
    indices: HashMap<String, u16>,
}

impl Wordlist {
    /// Load a wordlist from a file (UTF-8, one word per line)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a wordlist from an in-memory string (one word per line)
    ///
    /// Lines are trimmed and blank lines ignored. The result must contain
    /// exactly 2048 unique words.
    pub fn parse(contents: &str) -> Result<Self> {
        let words: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        let mut indices = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            indices.insert(word.clone(), i as u16);
        }

        if words.len() != WORDLIST_SIZE || indices.len() != words.len() {
            return Err(Error::WordlistSizeMismatch(indices.len()));
        }

        Ok(Self { words, indices })
    }

    /// The standard English wordlist bundled with the crate
    pub fn english() -> &'static Wordlist {
        ENGLISH_WORDLIST
            .get_or_init(|| Self::parse(ENGLISH).expect("bundled English wordlist is valid"))
    }

    /// Get the word at the given index
    ///
    /// Panics if `index >= 2048`; indices produced by 11-bit groups are
    /// always in range.
    pub fn word(&self, index: u16) -> &str {
        &self.words[usize::from(index)]
    }

    /// Get the index of a word, if present
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.indices.get(word).copied()
    }

    /// Whether the wordlist contains the given word
    pub fn contains(&self, word: &str) -> bool {
        self.indices.contains_key(word)
    }

    /// Number of words (always 2048)
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
