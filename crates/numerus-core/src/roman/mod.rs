// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Roman-numeral conversion.
//!
//! ## Structure
//!
//! - `table.rs` - the static digit table for hundreds, tens and ones
//! - `parse.rs` - numeral text back to an integer
//!
//! ## Usage
//!
//! ```rust
//! use numerus_core::roman::{from_roman, to_roman};
//!
//! assert_eq!(to_roman(1994), "MCMXCIV");
//! assert_eq!(from_roman("MCMXCIV").unwrap(), 1994);
//! ```

mod parse;
mod table;

pub use parse::from_roman;
pub use table::{DIGITS, digit_symbols};

/// Symbol repeated once per full thousand.
pub const THOUSAND: char = 'M';

/// Largest value with a classical representation (`MMMCMXCIX`).
pub const CLASSICAL_MAX: u64 = 3999;

/// Converts `n` into its Roman-numeral form.
///
/// The last three decimal digits go through the digit table; every full
/// thousand above them becomes one `M`. There is no symbol for zero, so
/// `to_roman(0)` is the empty string. Values of 4000 and above are not
/// rejected, they just produce a longer run of `M`. The output grows
/// linearly with `n / 1000`; callers taking untrusted input should bound `n`
/// first (see [`RenderOptions::max_value`](crate::RenderOptions::max_value)).
///
/// # Examples
///
/// ```rust
/// use numerus_core::to_roman;
///
/// assert_eq!(to_roman(4), "IV");
/// assert_eq!(to_roman(0), "");
/// assert_eq!(to_roman(5000), "MMMMM");
/// ```
pub fn to_roman(n: u64) -> String {
    let thousands = n / 1000;
    let rest = n % 1000;

    let mut out = String::with_capacity((thousands as usize).saturating_add(12));
    out.extend(std::iter::repeat_n(THOUSAND, thousands as usize));

    out.push_str(digit_symbols(2, (rest / 100) as usize));
    out.push_str(digit_symbols(1, (rest / 10 % 10) as usize));
    out.push_str(digit_symbols(0, (rest % 10) as usize));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtractive_forms() {
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(40), "XL");
        assert_eq!(to_roman(90), "XC");
        assert_eq!(to_roman(400), "CD");
        assert_eq!(to_roman(900), "CM");
    }

    #[test]
    fn test_mixed_values() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(1994), "MCMXCIV");
        assert_eq!(to_roman(2024), "MMXXIV");
        assert_eq!(to_roman(CLASSICAL_MAX), "MMMCMXCIX");
    }

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(to_roman(0), "");
    }

    #[test]
    fn test_thousands_repeat() {
        assert_eq!(to_roman(1000), "M");
        assert_eq!(to_roman(4000), "MMMM");
        assert_eq!(to_roman(4001), "MMMMI");
        assert_eq!(to_roman(12_345), format!("{}CCCXLV", "M".repeat(12)));
    }

    #[test]
    fn test_only_classical_symbols() {
        for n in 1..=CLASSICAL_MAX {
            assert!(
                to_roman(n).chars().all(|c| "IVXLCDM".contains(c)),
                "unexpected symbol in {}",
                n
            );
        }
    }
}
