// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted display preferences.
//!
//! ```text
//! prefs.json
//! {
//!   "icons": { "clean": "icons/ok.png", "ahead_and_behind": "icons/split.png" },
//!   "last_known_paths": ["libs/engine", "libs/ui"]
//! }
//!
//! icon_for(status):  store override  ->  [icons] config default  ->  None
//! ```
//!
//! The store is opaque to the status engine: it is written after each
//! published refresh and read for display, never for status computation.
//! Each status has its own icon; nothing is shared between kinds.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::types::IconsConfig;
use crate::error::PrefsError;
use crate::submodule::StatusKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PrefsData {
    #[serde(default)]
    icons: BTreeMap<StatusKind, String>,
    #[serde(default)]
    last_known_paths: Vec<String>,
}

/// Icon table and last-known submodule paths.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    defaults: IconsConfig,
    data: PrefsData,
}

impl PreferenceStore {
    /// A store that is never written to disk.
    #[must_use]
    pub fn in_memory(defaults: IconsConfig) -> Self {
        Self {
            path: None,
            defaults,
            data: PrefsData::default(),
        }
    }

    /// Loads the store at `path`; an absent file starts empty.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::Read` if the file cannot be read and
    /// `PrefsError::Parse` if it is not a valid preference file.
    pub fn open(path: impl Into<PathBuf>, defaults: IconsConfig) -> Result<Self, PrefsError> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| PrefsError::Parse {
                path: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preference file yet");
                PrefsData::default()
            }
            Err(source) => {
                return Err(PrefsError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        Ok(Self {
            path: Some(path),
            defaults,
            data,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Asset reference for `status`, if any.
    #[must_use]
    pub fn icon_for(&self, status: StatusKind) -> Option<&str> {
        self.data
            .icons
            .get(&status)
            .or_else(|| self.defaults.get(&status))
            .map(String::as_str)
    }

    /// Effective icon table: overrides on top of defaults.
    #[must_use]
    pub fn icons(&self) -> BTreeMap<StatusKind, String> {
        let mut icons = self.defaults.clone();
        icons.extend(
            self.data
                .icons
                .iter()
                .map(|(status, asset)| (*status, asset.clone())),
        );
        icons
    }

    /// Whether `status` has a stored override.
    #[must_use]
    pub fn is_overridden(&self, status: StatusKind) -> bool {
        self.data.icons.contains_key(&status)
    }

    pub fn set_icon(&mut self, status: StatusKind, asset: impl Into<String>) {
        self.data.icons.insert(status, asset.into());
    }

    /// Drops the override for `status`, falling back to the default.
    pub fn reset_icon(&mut self, status: StatusKind) -> Option<String> {
        self.data.icons.remove(&status)
    }

    /// Drops every icon override.
    pub fn reset_icons(&mut self) {
        self.data.icons.clear();
    }

    #[must_use]
    pub fn last_known_paths(&self) -> &[String] {
        &self.data.last_known_paths
    }

    /// Records the submodule paths of the latest set. Returns whether they
    /// changed.
    pub fn set_last_known_paths(&mut self, paths: Vec<String>) -> bool {
        if self.data.last_known_paths == paths {
            return false;
        }
        self.data.last_known_paths = paths;
        true
    }

    /// Writes the store atomically. In-memory stores do nothing.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::Write` if the directory, temp file, or rename fails.
    pub fn save(&self) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write_err = |source: std::io::Error| PrefsError::Write {
            path: path.display().to_string(),
            source,
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.write_all(b"\n").map_err(write_err)?;
        file.persist(path).map_err(|e| write_err(e.error))?;

        debug!(path = %path.display(), "saved preferences");
        Ok(())
    }
}
