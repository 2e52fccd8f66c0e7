//! The digit table.
//!
//! One row per decimal place (ones, tens, hundreds), indexed by the digit.
//! Digit 0 has no symbol.

/// Symbols for digits 0-9 at each place value, ones first.
pub static DIGITS: [[&str; 10]; 3] = [
    ["", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"],
    ["", "X", "XX", "XXX", "XL", "L", "LX", "LXX", "LXXX", "XC"],
    ["", "C", "CC", "CCC", "CD", "D", "DC", "DCC", "DCCC", "CM"],
];

/// Returns the symbols for `digit` at `place` (0 = ones, 1 = tens, 2 = hundreds).
///
/// Out-of-range arguments yield the empty string.
pub fn digit_symbols(place: usize, digit: usize) -> &'static str {
    DIGITS
        .get(place)
        .and_then(|row| row.get(digit))
        .copied()
        .unwrap_or("")
}
