// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # numerus-core
//!
//! Roman-numeral conversion and tagged-template assembly.
//!
//! ## Overview
//!
//! A tagged template hands its literal fragments and its substitution values
//! to a tag function separately. The `roman` tag implemented here converts
//! every substitution into a Roman numeral and splices it back between the
//! literal fragments:
//!
//! - [`roman`] - integer to numeral and back
//! - [`template`] - scanning `` `I have ${2} cats.` `` and assembling the result
//! - [`render`] - failure policy and batch rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use numerus_core::{RenderOptions, TaggedTemplate, assemble};
//!
//! let template = TaggedTemplate::new(["I have ", " cats."], [2u64])?;
//! let out = assemble(&template, &RenderOptions::default())?;
//! assert_eq!(out, "I have II cats.");
//! # Ok::<(), numerus_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
mod macros;
pub mod render;
pub mod roman;
pub mod template;

// Re-exports for convenience
pub use error::{Error, Result};
pub use render::{RenderOptions, SubstitutionPolicy, assemble, render, render_lines};
pub use roman::{from_roman, to_roman};
pub use template::{Substitution, Tag, TaggedTemplate, TemplateLiteral, parse_template};

/// Version of the numerus-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
