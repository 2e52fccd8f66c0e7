// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Tagged templates.
//!
//! A template invocation is split the way a tag function sees it: the
//! literal fragments on one side, the substitution values on the other.
//!
//! ## Structure
//!
//! - `scanner.rs` - `Scanner` turning template source text into a [`TemplateLiteral`]
//! - `substitution.rs` - [`Substitution`] values and their numeric parse
//!
//! ## Usage
//!
//! ```rust
//! use numerus_core::template::{Tag, parse_template};
//!
//! let literal = parse_template("roman`I have ${2} cats.`")?;
//! assert_eq!(literal.tag, Tag::Roman);
//! assert_eq!(literal.template.segments(), ["I have ", " cats."]);
//! # Ok::<(), numerus_core::Error>(())
//! ```

mod scanner;
mod substitution;

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

pub use scanner::{Scanner, parse_template};
pub use substitution::Substitution;

/// Literal fragments interleaved with substitution values.
///
/// Always holds exactly one more segment than values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTemplate {
    segments: Vec<String>,
    values: Vec<Substitution>,
}

impl TaggedTemplate {
    /// Builds a template from its segments and values.
    ///
    /// Fails with [`Error::MalformedTemplate`] unless there is exactly one
    /// more segment than there are values.
    pub fn new<S, V>(
        segments: impl IntoIterator<Item = S>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self>
    where
        S: Into<String>,
        V: Into<Substitution>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let values: Vec<Substitution> = values.into_iter().map(Into::into).collect();

        if segments.len() != values.len() + 1 {
            return Err(Error::MalformedTemplate {
                segments: segments.len(),
                values: values.len(),
            });
        }

        Ok(Self { segments, values })
    }

    /// A template with no substitutions.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            segments: vec![text.into()],
            values: Vec::new(),
        }
    }

    /// The literal fragments, in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The substitution values, in order
    pub fn values(&self) -> &[Substitution] {
        &self.values
    }

    /// Iterates `(value, following segment)` pairs after the first segment.
    pub fn pairs(&self) -> impl Iterator<Item = (&Substitution, &str)> {
        self.values
            .iter()
            .zip(self.segments[1..].iter().map(String::as_str))
    }

    /// Total length of the literal text
    pub fn literal_len(&self) -> usize {
        self.segments.iter().map(String::len).sum()
    }
}

/// The function a template literal is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Substitutions become Roman numerals
    Roman,
    /// Substitutions are spliced in verbatim, like an untagged literal
    Plain,
}

impl Tag {
    /// Canonical tag name
    pub fn name(self) -> &'static str {
        match self {
            Tag::Roman => "roman",
            Tag::Plain => "plain",
        }
    }

    /// All accepted spellings, for completion and help output
    pub fn all_names() -> &'static [&'static str] {
        &["roman", "romanize", "romeNumerize", "plain"]
    }
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "roman" | "romanize" | "romeNumerize" => Ok(Tag::Roman),
            "plain" => Ok(Tag::Plain),
            _ => Err(Error::UnknownTag(s.to_string())),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned template literal: its tag and its decomposed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLiteral {
    /// How substitutions are rendered
    pub tag: Tag,
    /// Segments and values
    pub template: TaggedTemplate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_lengths() {
        let ok = TaggedTemplate::new(["a", "b"], [1u64]);
        assert!(ok.is_ok());

        let err = TaggedTemplate::new(["a", "b", "c"], [1u64]).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedTemplate {
                segments: 3,
                values: 1
            }
        );

        let err = TaggedTemplate::new(Vec::<String>::new(), Vec::<u64>::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedTemplate { segments: 0, values: 0 }));
    }

    #[test]
    fn test_pairs() {
        let template = TaggedTemplate::new(["x=", ", y=", "."], [1u64, 2]).unwrap();
        let pairs: Vec<_> = template.pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], (&Substitution::Integer(1), ", y="));
        assert_eq!(pairs[1], (&Substitution::Integer(2), "."));
        assert_eq!(template.literal_len(), 7);
    }

    #[test]
    fn test_literal() {
        let template = TaggedTemplate::literal("no numbers here");
        assert_eq!(template.segments(), ["no numbers here"]);
        assert!(template.values().is_empty());
    }

    #[test]
    fn test_tag_names() {
        assert_eq!("romeNumerize".parse::<Tag>().unwrap(), Tag::Roman);
        assert_eq!("plain".parse::<Tag>().unwrap(), Tag::Plain);
        assert_eq!(
            "html".parse::<Tag>().unwrap_err(),
            Error::UnknownTag("html".into())
        );
        for name in Tag::all_names() {
            assert!(name.parse::<Tag>().is_ok());
        }
    }
}
