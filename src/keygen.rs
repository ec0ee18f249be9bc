//! Key Generation
//!
//! Turns an integer index into a short key. Generators are pure: the same
//! index always yields the same key, and distinct indices should yield
//! distinct keys. The store picks the index (current size plus the attempt
//! number), so collisions with keys inserted by other means resolve by
//! moving to the next index.

use crate::error::{Result, StoreError};

/// Default alphabet: lowercase, uppercase, then digits
pub const BASE62_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Maps an index to a key
pub trait KeyGenerator: Send + Sync {
    fn generate(&self, index: u64) -> String;
}

impl<F> KeyGenerator for F
where
    F: Fn(u64) -> String + Send + Sync,
{
    fn generate(&self, index: u64) -> String {
        self(index)
    }
}

/// Positional encoding of the index over a fixed alphabet
///
/// Most significant digit first, so with the base-62 alphabet `0 -> "a"`,
/// `61 -> "9"` and `62 -> "ba"`.
#[derive(Debug, Clone)]
pub struct AlphabetKeyGen {
    alphabet: Vec<u8>,
}

impl AlphabetKeyGen {
    /// Generator over [`BASE62_ALPHABET`]
    pub fn base62() -> Self {
        Self {
            alphabet: BASE62_ALPHABET.to_vec(),
        }
    }

    /// Generator over a custom alphabet
    ///
    /// The alphabet needs at least two bytes, all printable ASCII and
    /// pairwise distinct; otherwise keys would be ambiguous.
    pub fn new(alphabet: &[u8]) -> Result<Self> {
        if alphabet.len() < 2 {
            return Err(StoreError::Config(format!(
                "key alphabet needs at least 2 symbols, got {}",
                alphabet.len()
            )));
        }
        if let Some(b) = alphabet.iter().find(|b| !b.is_ascii_graphic()) {
            return Err(StoreError::Config(format!(
                "key alphabet contains non-printable byte 0x{:02x}",
                b
            )));
        }
        let mut seen = [false; 128];
        for &b in alphabet {
            if seen[b as usize] {
                return Err(StoreError::Config(format!(
                    "key alphabet repeats symbol '{}'",
                    b as char
                )));
            }
            seen[b as usize] = true;
        }
        Ok(Self {
            alphabet: alphabet.to_vec(),
        })
    }

    /// Number of symbols in the alphabet
    pub fn radix(&self) -> usize {
        self.alphabet.len()
    }
}

impl Default for AlphabetKeyGen {
    fn default() -> Self {
        Self::base62()
    }
}

impl KeyGenerator for AlphabetKeyGen {
    fn generate(&self, mut index: u64) -> String {
        let radix = self.alphabet.len() as u64;
        if index == 0 {
            return (self.alphabet[0] as char).to_string();
        }

        let mut digits = Vec::new();
        while index > 0 {
            digits.push(self.alphabet[(index % radix) as usize]);
            index /= radix;
        }
        digits.reverse();

        // alphabet is validated ASCII
        digits.into_iter().map(char::from).collect()
    }
}
