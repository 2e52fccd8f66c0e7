// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for numeral conversion and template handling

use thiserror::Error;

/// Result type for numerus operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting numerals or assembling templates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Substitution text is not a non-negative whole number
    #[error("Invalid numeral input '{input}': expected a non-negative whole number")]
    InvalidNumeralInput {
        /// The offending substitution text
        input: String,
    },

    /// Value exceeds the configured conversion limit
    #[error("Value {value} exceeds the maximum of {max}")]
    ValueTooLarge {
        /// Resolved value
        value: u64,
        /// Configured limit
        max: u64,
    },

    /// A substitution failed while assembling a template
    #[error("Substitution #{index}: {source}")]
    Substitution {
        /// 0-based substitution index
        index: usize,
        /// Underlying conversion error
        #[source]
        source: Box<Error>,
    },

    /// Segment and value counts do not line up
    #[error("Malformed template: {segments} segments for {values} values")]
    MalformedTemplate {
        /// Number of literal segments supplied
        segments: usize,
        /// Number of substitution values supplied
        values: usize,
    },

    /// A backtick-delimited literal was never closed
    #[error("Unterminated template literal starting at offset {offset}")]
    UnterminatedTemplate {
        /// Byte offset of the opening backtick
        offset: usize,
    },

    /// A `${` placeholder was never closed
    #[error("Unterminated substitution starting at offset {offset}")]
    UnterminatedSubstitution {
        /// Byte offset of the `$`
        offset: usize,
    },

    /// A `${}` placeholder with nothing inside
    #[error("Empty substitution at offset {offset}")]
    EmptySubstitution {
        /// Byte offset of the `$`
        offset: usize,
    },

    /// Text after the closing backtick
    #[error("Unexpected input after template literal at offset {offset}")]
    TrailingInput {
        /// Byte offset of the first character after the literal
        offset: usize,
    },

    /// Tag name that is not registered
    #[error("Unknown template tag '{0}'")]
    UnknownTag(String),

    /// Text is not a canonical Roman numeral
    #[error("Invalid Roman numeral '{input}'")]
    InvalidRoman {
        /// The offending text
        input: String,
    },

    /// Roman numeral value does not fit in 64 bits
    #[error("Roman numeral is too large")]
    RomanOverflow,
}

impl Error {
    /// Create an invalid-input error
    pub fn invalid_input(input: impl Into<String>) -> Self {
        Self::InvalidNumeralInput {
            input: input.into(),
        }
    }

    /// Create an invalid-numeral error
    pub fn invalid_roman(input: impl Into<String>) -> Self {
        Self::InvalidRoman {
            input: input.into(),
        }
    }

    /// Attach a substitution index to a conversion error
    pub fn at_substitution(self, index: usize) -> Self {
        Self::Substitution {
            index,
            source: Box::new(self),
        }
    }

    /// Whether this error comes from a single value rather than template structure
    pub fn is_conversion_error(&self) -> bool {
        match self {
            Self::InvalidNumeralInput { .. } | Self::ValueTooLarge { .. } => true,
            Self::Substitution { source, .. } => source.is_conversion_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_template_message() {
        let err = Error::MalformedTemplate {
            segments: 3,
            values: 1,
        };
        assert_eq!(
            err.to_string(),
            "Malformed template: 3 segments for 1 values"
        );
    }

    #[test]
    fn test_substitution_wraps_source() {
        let err = Error::invalid_input("abc").at_substitution(1);
        assert_eq!(
            err.to_string(),
            "Substitution #1: Invalid numeral input 'abc': expected a non-negative whole number"
        );
        assert!(err.is_conversion_error());
        assert!(!Error::UnknownTag("x".into()).is_conversion_error());
    }
}
