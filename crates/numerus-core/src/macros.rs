// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Template macros.

/// Renders a `roman` tagged template from Rust code.
///
/// Every `{}` in the literal marks a substitution; the values follow as
/// arguments, in order. Expands to a [`Result<String>`](crate::Result)
/// rendered with the default [`RenderOptions`](crate::RenderOptions).
///
/// # Example
///
/// ```
/// use numerus_core::roman;
///
/// let text = roman!("I have {} cats. But my neighbour has {}", 2u32, 4u32)?;
/// assert_eq!(text, "I have II cats. But my neighbour has IV");
///
/// // Too few values for the placeholders
/// assert!(roman!("{} and {}", 1u32).is_err());
/// # Ok::<(), numerus_core::Error>(())
/// ```
#[macro_export]
macro_rules! roman {
    ($template:literal $(, $value:expr)* $(,)?) => {{
        let values: ::std::vec::Vec<$crate::Substitution> =
            ::std::vec![$($crate::Substitution::from($value)),*];
        $crate::TaggedTemplate::new($template.split("{}"), values).and_then(|template| {
            $crate::assemble(&template, &$crate::RenderOptions::default())
        })
    }};
}

#[cfg(test)]
mod tests {
    use crate::Error;

    #[test]
    fn test_roman_macro() {
        assert_eq!(roman!("year {}", 1994u32).unwrap(), "year MCMXCIV");
        assert_eq!(roman!("no values").unwrap(), "no values");
        assert_eq!(roman!("{}", "12").unwrap(), "XII");
    }

    #[test]
    fn test_roman_macro_arity() {
        assert_eq!(
            roman!("{}", 1u32, 2u32).unwrap_err(),
            Error::MalformedTemplate {
                segments: 2,
                values: 2
            }
        );
    }

    #[test]
    fn test_roman_macro_fails_closed() {
        assert!(matches!(
            roman!("{} cats", "many"),
            Err(Error::Substitution { index: 0, .. })
        ));
    }
}
