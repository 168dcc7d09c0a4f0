// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! [global]   log levels, log file, json logs
//! [monitor]  root, modules_file, refresh interval, parallelism, prefs file
//! [git]      executable, query/action timeouts
//! [icons]    status -> asset reference (one entry per status)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogLevel;
use crate::submodule::StatusKind;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
    /// Emit console logs as JSON lines.
    pub json_logs: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            json_logs: false,
        }
    }
}

/// Monitoring options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Root of the parent repository.
    pub root: PathBuf,
    /// Submodule declaration file, relative to `root`.
    pub modules_file: String,
    /// Staleness interval for periodic refreshes.
    pub refresh_interval_secs: u64,
    /// Maximum submodules observed at once (0 = available parallelism).
    pub max_parallel: usize,
    /// Preference store location, relative to `root` unless absolute.
    pub prefs_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            modules_file: ".gitmodules".to_string(),
            refresh_interval_secs: 10,
            max_parallel: 0,
            prefs_file: Some(PathBuf::from(".subwatch/prefs.json")),
        }
    }
}

impl MonitorConfig {
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Resolved parallelism limit.
    #[must_use]
    pub fn parallelism(&self) -> usize {
        if self.max_parallel > 0 {
            self.max_parallel
        } else {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(4)
        }
    }

    /// Preference file path resolved against `root`.
    #[must_use]
    pub fn prefs_path(&self) -> Option<PathBuf> {
        self.prefs_file.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                self.root.join(p)
            }
        })
    }
}

/// Git invocation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable name or path.
    pub executable: String,
    /// Bound on each read-only query.
    pub query_timeout_secs: u64,
    /// Bound on each pull/push before it is reported as failed.
    pub action_timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: "git".to_string(),
            query_timeout_secs: 8,
            action_timeout_secs: 120,
        }
    }
}

impl GitConfig {
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    #[must_use]
    pub const fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout_secs)
    }
}

/// Default icon references, one per status.
///
/// Seeds the preference store; entries already in the store win.
pub type IconsConfig = BTreeMap<StatusKind, String>;
