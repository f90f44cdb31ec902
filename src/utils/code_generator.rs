//! Random short code generation.
//!
//! Codes are drawn uniformly from a fixed alphabet using the thread-local
//! RNG, so concurrent callers never contend on shared state.

use rand::Rng;

/// Default alphabet: lowercase, uppercase, digits (62 symbols).
pub const DEFAULT_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates fixed-length random short codes.
///
/// The alphabet and length are fixed at construction. The generator makes
/// no uniqueness promise; collisions are resolved by the store.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<u8>,
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator over the default 62-symbol alphabet.
    pub fn new(length: usize) -> Self {
        Self::with_alphabet(DEFAULT_ALPHABET, length)
    }

    /// Creates a generator over a custom alphabet.
    ///
    /// # Panics
    ///
    /// Panics if `alphabet` is empty.
    pub fn with_alphabet(alphabet: &[u8], length: usize) -> Self {
        assert!(!alphabet.is_empty(), "code alphabet must not be empty");
        Self {
            alphabet: alphabet.to_vec(),
            length,
        }
    }

    /// Length of the codes produced by [`Self::generate`].
    #[cfg(test)]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true if every character of `code` belongs to this alphabet.
    #[cfg(test)]
    pub fn is_in_alphabet(&self, code: &str) -> bool {
        code.bytes().all(|b| self.alphabet.contains(&b))
    }

    /// Generates a code of the configured length.
    pub fn generate(&self) -> String {
        self.generate_with_length(self.length)
    }

    /// Generates a code of exactly `length` characters.
    pub fn generate_with_length(&self, length: usize) -> String {
        let mut rng = rand::rng();

        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..self.alphabet.len());
                self.alphabet[idx] as char
            })
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}
