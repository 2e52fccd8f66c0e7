// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration management for numerus.
//!
//! Settings come from `numerus.toml`, looked up in the current directory and
//! then in the user's config directory. Command-line flags (and their
//! `NUMERUS_*` environment variables) override the file.

use anyhow::{Context, Result};
use numerus_core::{RenderOptions, SubstitutionPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name
pub const CONFIG_FILE: &str = "numerus.toml";

/// Default number of REPL history entries kept
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Configuration for numerus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How substitutions are rendered
    #[serde(flatten)]
    pub render: RenderOptions,

    /// REPL history entries kept
    pub history_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

/// Values given on the command line, each overriding the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--policy`
    pub policy: Option<SubstitutionPolicy>,
    /// `--sentinel`
    pub sentinel: Option<String>,
    /// `--max-value`
    pub max_value: Option<u64>,
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the first config file found
    /// is used, and the defaults apply when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::candidates().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads and parses one config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses config text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies command-line overrides
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(policy) = overrides.policy {
            self.render.policy = policy;
        }
        if let Some(sentinel) = overrides.sentinel {
            self.render.sentinel = sentinel;
        }
        if let Some(max_value) = overrides.max_value {
            self.render.max_value = max_value;
        }
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("numerus").join(CONFIG_FILE));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.render.policy, SubstitutionPolicy::FailClosed);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = Config::from_toml(
            r#"
            policy = "sentinel"
            sentinel = "??"
            max_value = 3999
            history_size = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.render.policy, SubstitutionPolicy::Sentinel);
        assert_eq!(config.render.sentinel, "??");
        assert_eq!(config.render.max_value, 3999);
        assert_eq!(config.history_size, 10);
    }

    #[test]
    fn test_invalid_policy() {
        assert!(Config::from_toml(r#"policy = "maybe""#).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::from_toml(r#"sentinel = "file""#).unwrap();
        config.apply(Overrides {
            policy: Some(SubstitutionPolicy::Sentinel),
            sentinel: Some("flag".into()),
            max_value: None,
        });
        assert_eq!(config.render.policy, SubstitutionPolicy::Sentinel);
        assert_eq!(config.render.sentinel, "flag");
        assert_eq!(config.render.max_value, numerus_core::render::DEFAULT_MAX_VALUE);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_value = 42").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.render.max_value, 42);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
