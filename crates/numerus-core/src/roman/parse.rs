//! Numeral text back to an integer.

use super::to_roman;
use crate::error::{Error, Result};

fn symbol_value(c: char) -> Option<u64> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Parses a Roman numeral into its value.
///
/// Case-insensitive and whitespace-trimmed. Only the canonical form that
/// [`to_roman`] produces is accepted, so `IIII`, `VX` and `IC` are errors.
/// The empty string parses to 0, mirroring `to_roman(0)`.
///
/// # Examples
///
/// ```rust
/// use numerus_core::from_roman;
///
/// assert_eq!(from_roman("xiv").unwrap(), 14);
/// assert!(from_roman("IIII").is_err());
/// ```
pub fn from_roman(text: &str) -> Result<u64> {
    let normalized = text.trim().to_ascii_uppercase();

    let values = normalized
        .chars()
        .map(|c| symbol_value(c).ok_or_else(|| Error::invalid_roman(text)))
        .collect::<Result<Vec<_>>>()?;

    let mut total: u64 = 0;
    let mut i = 0;
    while i < values.len() {
        let value = values[i];
        let (amount, width) = match values.get(i + 1) {
            Some(&next) if next > value => (next - value, 2),
            _ => (value, 1),
        };
        total = total.checked_add(amount).ok_or(Error::RomanOverflow)?;
        i += width;
    }

    // Anything that does not re-encode to itself is non-canonical
    if to_roman(total) != normalized {
        return Err(Error::invalid_roman(text));
    }

    Ok(total)
}
