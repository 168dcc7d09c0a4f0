// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for subwatch.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. subwatch.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. SUBWATCH_* env vars
//! 5. --set section.key=value
//! 6. CLI flags (--root, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SUBWATCH_GIT__EXECUTABLE=/usr/bin/git            → git.executable
//! SUBWATCH_MONITOR__REFRESH_INTERVAL_SECS=30        → monitor.refresh_interval_secs
//! ```
//!
//! # Example
//!
//! ```toml
//! [monitor]
//! refresh_interval_secs = 10
//!
//! [git]
//! query_timeout_secs = 8
//!
//! [icons]
//! clean = "icons/clean.png"
//! ahead_and_behind = "icons/diverged.png"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, IconsConfig, MonitorConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Monitoring options.
    pub monitor: MonitorConfig,
    /// Git invocation options.
    pub git: GitConfig,
    /// Default icon table.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub icons: IconsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use subwatch::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("subwatch.toml")
    ///     .with_env_prefix("SUBWATCH")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.git.executable.trim().is_empty() {
            return Err(invalid("git", "executable", "must not be empty"));
        }
        if self.git.query_timeout_secs == 0 {
            return Err(invalid("git", "query_timeout_secs", "must be greater than zero"));
        }
        if self.git.action_timeout_secs == 0 {
            return Err(invalid("git", "action_timeout_secs", "must be greater than zero"));
        }
        if self.monitor.refresh_interval_secs == 0 {
            return Err(invalid(
                "monitor",
                "refresh_interval_secs",
                "must be greater than zero",
            ));
        }
        if self.monitor.modules_file.trim().is_empty() {
            return Err(invalid("monitor", "modules_file", "must not be empty"));
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_monitor_options(&mut options);
        self.format_git_options(&mut options);
        for (status, asset) in &self.icons {
            options.insert(format!("icons.{}", status.key()), asset.clone());
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.json_logs".into(), self.global.json_logs.to_string());
    }

    fn format_monitor_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "monitor.root".into(),
            self.monitor.root.display().to_string(),
        );
        options.insert(
            "monitor.modules_file".into(),
            self.monitor.modules_file.clone(),
        );
        options.insert(
            "monitor.refresh_interval_secs".into(),
            self.monitor.refresh_interval_secs.to_string(),
        );
        options.insert(
            "monitor.max_parallel".into(),
            self.monitor.max_parallel.to_string(),
        );
        options.insert(
            "monitor.prefs_file".into(),
            self.monitor
                .prefs_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("git.executable".into(), self.git.executable.clone());
        options.insert(
            "git.query_timeout_secs".into(),
            self.git.query_timeout_secs.to_string(),
        );
        options.insert(
            "git.action_timeout_secs".into(),
            self.git.action_timeout_secs.to_string(),
        );
    }
}
