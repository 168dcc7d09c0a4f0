// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("subwatch.toml")   skipped if absent
//!   .add_toml_file(path)                       --config, must exist
//!   .with_env_prefix("SUBWATCH")               SUBWATCH_GIT__EXECUTABLE=...
//!   .set_assignment("git.query_timeout_secs=3")  --set
//!   .build()  -->  Config, then Config::validate
//! ```
//!
//! Later layers win. Environment variables are applied after every file and
//! before `set` overrides, whatever order the calls were made in.

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// A layer that contributed to the configuration, for `subwatch options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    OptionalFile(PathBuf),
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::OptionalFile(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
        }
    }
}

/// Collects configuration layers and merges them into a `Config`.
pub struct ConfigLoader {
    layers: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn push_file(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.layers = self.layers.add_source(file);
        self
    }

    /// Adds a TOML file that must exist when `build` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.push_file(path, true);
        loader.sources.push(ConfigSource::File(path.to_path_buf()));
        loader
    }

    /// Adds a TOML file that is skipped if absent. Only listed as a source
    /// when it exists.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.push_file(path, false);
        if path.exists() {
            loader
                .sources
                .push(ConfigSource::OptionalFile(path.to_path_buf()));
        }
        loader
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.layers = self
            .layers
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides one dotted key.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not a valid config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.layers = self
            .layers
            .set_override(key, value)
            .map_err(|e| ConfigError::InvalidValue {
                section: "cli".to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(self)
    }

    /// Applies a `section.key=value` assignment from `--set`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the assignment has no `=` or its
    /// key has no section.
    pub fn set_assignment(self, assignment: &str) -> Result<Self> {
        let (key, value) = parse_assignment(assignment)?;
        self.set(key, value)
    }

    /// Merges every layer and validates the result.
    ///
    /// # Errors
    ///
    /// Fails on a missing required file, invalid TOML, a value of the wrong
    /// type or an unknown key, and on anything `Config::validate` rejects.
    pub fn build(self) -> Result<Config> {
        let layers = match &self.env_prefix {
            Some(prefix) => self.layers.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.layers,
        };
        let config: Config = layers.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source lines, lowest priority first.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .zip(1..)
            .map(|(source, n)| format!("{n}. {source}"))
            .collect()
    }
}

/// Splits `section.key=value` into a trimmed key and value.
fn parse_assignment(assignment: &str) -> std::result::Result<(&str, &str), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        section: "cli".to_string(),
        key: "--set".to_string(),
        message: format!("{message}: '{assignment}'"),
    };

    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| invalid("expected section.key=value"))?;
    let key = key.trim();
    match key.split_once('.') {
        Some((section, rest)) if !section.is_empty() && !rest.is_empty() && !rest.ends_with('.') => {
            Ok((key, value.trim()))
        }
        _ => Err(invalid("key must be section.key")),
    }
}
