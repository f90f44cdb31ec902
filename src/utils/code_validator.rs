//! Validation of user-supplied short codes.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

/// Codes that would shadow system routes.
pub const RESERVED_CODES: &[&str] = &["api", "health", "login", "logout", "static", "admin"];

static CODE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("static regex is valid"));

/// Why a custom code was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeViolation {
    #[error("short code `{0}` may only contain letters, digits and hyphens")]
    InvalidFormat(String),

    #[error("short code `{0}` is reserved")]
    Reserved(String),
}

/// Checks custom codes against the format rule and a reserved-word list.
///
/// The reserved list is fixed when the validator is built. Validation is pure
/// and performs no I/O.
#[derive(Debug, Clone)]
pub struct CodeValidator {
    reserved: HashSet<String>,
}

impl CodeValidator {
    /// Creates a validator that rejects the standard reserved words plus `extra`.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reserved = RESERVED_CODES
            .iter()
            .map(|s| s.to_string())
            .chain(extra.into_iter().map(Into::into))
            .collect();

        Self { reserved }
    }

    /// Returns true if `code` is on the reserved list.
    pub fn is_reserved(&self, code: &str) -> bool {
        self.reserved.contains(code)
    }

    /// Validates a custom code.
    ///
    /// The empty string is not special-cased here: callers treat an empty
    /// custom code as "generate one" before reaching the validator.
    ///
    /// # Errors
    ///
    /// - [`CodeViolation::InvalidFormat`] if the code does not match `^[A-Za-z0-9-]+$`
    /// - [`CodeViolation::Reserved`] if the code is a reserved word
    pub fn validate(&self, code: &str) -> Result<(), CodeViolation> {
        if self.is_reserved(code) {
            return Err(CodeViolation::Reserved(code.to_string()));
        }

        if !CODE_FORMAT.is_match(code) {
            return Err(CodeViolation::InvalidFormat(code.to_string()));
        }

        Ok(())
    }
}

impl Default for CodeValidator {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}
