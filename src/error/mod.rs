// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              WatchError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+
//!   |      |      |       |      |      |
//!   v      v      v       v      v      v
//!  Git  Registry Process Config Prefs Monitor
//!  Box    Box     Box     Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git      ToolUnavailable, QueryTimeout, CommandFailed, EmptyOutput
//!   Registry Read, InvalidPath
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout, OutputError
//!   Config   InvalidValue
//!   Prefs    Read, Write, Parse, UnknownStatus
//!   Monitor  UnknownSubmodule, ActionNotEligible
//! ```
//!
//! Nothing in the status engine is fatal: `GitError` values become an
//! `Unknown` status or a failed action outcome, they never reach `main`.

use std::time::Duration;
use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`WatchError`].
pub type WatchResult<T> = std::result::Result<T, WatchError>;

/// Result type for git queries and actions.
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for process execution.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Git query or action failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Submodule configuration could not be read.
    #[error("registry error: {0}")]
    Registry(#[from] Box<RegistryError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Preference store error.
    #[error("preferences error: {0}")]
    Prefs(#[from] Box<PrefsError>),

    /// Consumer request rejected.
    #[error("monitor error: {0}")]
    Monitor(#[from] Box<MonitorError>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for WatchError {
                fn from(err: $error) -> Self {
                    WatchError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    RegistryError => Registry,
    ProcessError => Process,
    ConfigError => Config,
    PrefsError => Prefs,
    MonitorError => Monitor,
}

// --- Git Errors ---

/// Failures of a single git query or action.
///
/// Each variant is scoped to one invocation in one submodule directory.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be found.
    #[error("git executable not available: '{tool}'")]
    ToolUnavailable { tool: String },

    /// The invocation exceeded its bounded wait.
    #[error("'{command}' timed out after {timeout:?}")]
    QueryTimeout { command: String, timeout: Duration },

    /// The invocation could not start or exited with a failure code.
    #[error("'{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The invocation succeeded but produced nothing to interpret.
    #[error("'{command}' produced no output")]
    EmptyOutput { command: String },
}

impl GitError {
    /// Maps a process failure onto the git failure it represents.
    #[must_use]
    pub fn from_process(command: &str, err: ProcessError) -> Self {
        match err {
            ProcessError::ExecutableNotFound { name } => Self::ToolUnavailable { tool: name },
            ProcessError::Timeout { timeout, .. } => Self::QueryTimeout {
                command: command.to_string(),
                timeout,
            },
            ProcessError::NonZeroExit { code, stderr, .. } => Self::CommandFailed {
                command: command.to_string(),
                message: if stderr.is_empty() {
                    format!("exited with code {code}")
                } else {
                    format!("exited with code {code}: {stderr}")
                },
            },
            other => Self::CommandFailed {
                command: command.to_string(),
                message: other.to_string(),
            },
        }
    }

    /// Returns true when no further git invocation can succeed either.
    #[must_use]
    pub const fn is_tool_unavailable(&self) -> bool {
        matches!(self, Self::ToolUnavailable { .. })
    }
}

// --- Registry Errors ---

/// Submodule configuration file errors.
///
/// A missing file is not an error; see `submodule::registry::discover`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The modules file exists but could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A `path` value that would leave the parent repository.
    #[error("submodule path '{path}' is {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a code outside its success set.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// Failed to wait on or read from the process.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Preference Errors ---

/// Preference store errors.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Failed to read the preference file.
    #[error("failed to read preferences '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the preference file.
    #[error("failed to write preferences '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The preference file is not valid JSON for the store.
    #[error("failed to parse preferences '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A status name did not match any status kind.
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

// --- Monitor Errors ---

/// Consumer requests the monitor refuses.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// No submodule with this path in the current snapshot set.
    #[error("no submodule at path '{0}'")]
    UnknownSubmodule(String),

    /// The latest status does not allow the requested action.
    #[error("{action} is not available for '{path}' (status: {status})")]
    ActionNotEligible {
        action: String,
        path: String,
        status: String,
    },
}
