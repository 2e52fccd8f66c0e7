//! Substitution values.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;

/// One value spliced between two literal fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// An already-numeric value
    Integer(u64),
    /// Raw placeholder text, parsed when the template is rendered
    Text(String),
}

impl Substitution {
    /// Resolves the value to a non-negative integer.
    ///
    /// Text is trimmed and parsed as a decimal integer (a leading `+` is
    /// allowed). Failing that, any finite float literal whose value is a
    /// non-negative whole number is accepted, so `"2.0"` and `"1e3"` resolve
    /// while `"2.5"`, `"-1"`, `"NaN"` and `""` are rejected.
    pub fn resolve(&self) -> Result<u64> {
        match self {
            Substitution::Integer(n) => Ok(*n),
            Substitution::Text(text) => parse_whole_number(text),
        }
    }

    /// The value as it appears in the source
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Substitution::Integer(n) => Cow::Owned(n.to_string()),
            Substitution::Text(text) => Cow::Borrowed(text),
        }
    }
}

fn parse_whole_number(text: &str) -> Result<u64> {
    let trimmed = text.trim();

    if let Ok(n) = trimmed.parse::<u64>() {
        return Ok(n);
    }

    // 2^64 as f64; anything at or above it does not fit
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < LIMIT => Ok(f as u64),
        _ => Err(Error::invalid_input(text)),
    }
}

impl From<u64> for Substitution {
    fn from(n: u64) -> Self {
        Substitution::Integer(n)
    }
}

impl From<u32> for Substitution {
    fn from(n: u32) -> Self {
        Substitution::Integer(n.into())
    }
}

impl From<u16> for Substitution {
    fn from(n: u16) -> Self {
        Substitution::Integer(n.into())
    }
}

impl From<&str> for Substitution {
    fn from(text: &str) -> Self {
        Substitution::Text(text.to_string())
    }
}

impl From<String> for Substitution {
    fn from(text: String) -> Self {
        Substitution::Text(text)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}
