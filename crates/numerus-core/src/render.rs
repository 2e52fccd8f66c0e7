// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Rendering templates into strings.
//!
//! [`assemble`] is the `roman` tag itself: it walks the segments and splices
//! in the numeral of each value. What happens when a value does not convert
//! is decided by the [`SubstitutionPolicy`] in [`RenderOptions`].

use crate::error::{Error, Result};
use crate::roman::to_roman;
use crate::template::{Substitution, Tag, TaggedTemplate, parse_template};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Default upper bound on a substituted value
pub const DEFAULT_MAX_VALUE: u64 = 100_000;

/// Default marker spliced in for a value that does not convert
pub const DEFAULT_SENTINEL: &str = "NaN";

/// What to do when a substitution cannot be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubstitutionPolicy {
    /// Reject the whole template with the first conversion error
    #[default]
    FailClosed,
    /// Splice the sentinel marker in place of the bad value and carry on
    Sentinel,
}

impl SubstitutionPolicy {
    /// Canonical policy name
    pub fn name(self) -> &'static str {
        match self {
            SubstitutionPolicy::FailClosed => "fail-closed",
            SubstitutionPolicy::Sentinel => "sentinel",
        }
    }
}

impl FromStr for SubstitutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail-closed" | "strict" => Ok(SubstitutionPolicy::FailClosed),
            "sentinel" | "lenient" => Ok(SubstitutionPolicy::Sentinel),
            other => Err(format!(
                "unknown policy '{}' (expected 'fail-closed' or 'sentinel')",
                other
            )),
        }
    }
}

impl fmt::Display for SubstitutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options controlling how substitutions are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Failure policy
    pub policy: SubstitutionPolicy,

    /// Marker used by [`SubstitutionPolicy::Sentinel`]
    pub sentinel: String,

    /// Largest value that will be converted.
    ///
    /// Every thousand costs one `M`, so this bounds the output size.
    pub max_value: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            policy: SubstitutionPolicy::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            max_value: DEFAULT_MAX_VALUE,
        }
    }
}

impl RenderOptions {
    /// Creates options with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure policy
    pub fn with_policy(mut self, policy: SubstitutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the sentinel marker
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Sets the largest convertible value
    pub fn with_max_value(mut self, max_value: u64) -> Self {
        self.max_value = max_value;
        self
    }

    /// Converts one substitution to its numeral, applying the value limit.
    pub fn convert(&self, value: &Substitution) -> Result<String> {
        let n = value.resolve()?;
        if n > self.max_value {
            return Err(Error::ValueTooLarge {
                value: n,
                max: self.max_value,
            });
        }
        Ok(to_roman(n))
    }
}

/// Assembles a template, replacing every value with its Roman numeral.
///
/// The output is `segments[0]`, then each numeral followed by the next
/// segment. Under [`SubstitutionPolicy::FailClosed`] the first bad value
/// aborts with [`Error::Substitution`]; under
/// [`SubstitutionPolicy::Sentinel`] the sentinel takes its place.
///
/// # Examples
///
/// ```rust
/// use numerus_core::{RenderOptions, SubstitutionPolicy, TaggedTemplate, assemble};
///
/// let template = TaggedTemplate::new(["I have ", " cats."], ["many"])?;
///
/// assert!(assemble(&template, &RenderOptions::default()).is_err());
///
/// let lenient = RenderOptions::default().with_policy(SubstitutionPolicy::Sentinel);
/// assert_eq!(assemble(&template, &lenient)?, "I have NaN cats.");
/// # Ok::<(), numerus_core::Error>(())
/// ```
pub fn assemble(template: &TaggedTemplate, options: &RenderOptions) -> Result<String> {
    debug!(
        segments = template.segments().len(),
        policy = %options.policy,
        "assembling template"
    );

    let mut out = String::with_capacity(template.literal_len() + template.values().len() * 8);
    out.push_str(&template.segments()[0]);

    for (index, (value, segment)) in template.pairs().enumerate() {
        match options.convert(value) {
            Ok(numeral) => {
                trace!(index, value = %value, numeral = %numeral, "converted substitution");
                out.push_str(&numeral);
            }
            Err(err) => match options.policy {
                SubstitutionPolicy::FailClosed => return Err(err.at_substitution(index)),
                SubstitutionPolicy::Sentinel => {
                    warn!(index, error = %err, "substitution replaced by sentinel");
                    out.push_str(&options.sentinel);
                }
            },
        }
        out.push_str(segment);
    }

    Ok(out)
}

/// Joins a template with its substitution text spliced in verbatim.
///
/// This is what an untagged template literal produces.
pub fn interpolate(template: &TaggedTemplate) -> String {
    let mut out = String::with_capacity(template.literal_len());
    out.push_str(&template.segments()[0]);
    for (value, segment) in template.pairs() {
        out.push_str(&value.as_text());
        out.push_str(segment);
    }
    out
}

/// Scans template source and renders it with its tag.
///
/// # Examples
///
/// ```rust
/// use numerus_core::{RenderOptions, render};
///
/// let options = RenderOptions::default();
/// assert_eq!(render("I have ${2} cats.", &options)?, "I have II cats.");
/// assert_eq!(render("`I have ${2} cats.`", &options)?, "I have 2 cats.");
/// # Ok::<(), numerus_core::Error>(())
/// ```
pub fn render(source: &str, options: &RenderOptions) -> Result<String> {
    let literal = parse_template(source)?;
    match literal.tag {
        Tag::Roman => assemble(&literal.template, options),
        Tag::Plain => Ok(interpolate(&literal.template)),
    }
}

/// Renders every non-empty line of `text` as its own template.
///
/// Results come back in line order. Lines are rendered in parallel when
/// the `parallel` feature is enabled.
pub fn render_lines(text: &str, options: &RenderOptions) -> Vec<Result<String>> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    debug!(lines = lines.len(), "rendering batch");

    #[cfg(feature = "parallel")]
    let results: Vec<Result<String>> = {
        use rayon::prelude::*;

        lines
            .par_iter()
            .map(|line| render(line, options))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<String>> = lines.iter().map(|line| render(line, options)).collect();

    results
}
