// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule status engine: identities, facts, and composite status.
//!
//! ```text
//! registry::discover(root, .gitmodules)
//!        |
//!        v
//!  Vec<SubmoduleEntry>  (config order)
//!        |
//!        v  one task per entry, bounded, serialized per path
//!  observer::VcsQueryClient::observe
//!        |
//!        v
//!    VcsFacts --> reducer::reduce --> StatusKind
//!        |
//!        v
//!  SubmoduleSnapshot { entry, facts, status }
//!        |
//!        v
//!  SnapshotSet { snapshots, captured_at }   (published by cache)
//! ```
//!
//! `action::ActionDispatcher` runs pull/push outside the refresh cycle.

pub mod action;
pub mod observer;
pub mod reducer;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_utils;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PrefsError;

pub use action::{ActionDispatcher, ActionKind, ActionOutcome, ActionResult};
pub use observer::{PathLocks, VcsQueryClient};
pub use reducer::{drift, eligibility, reduce};
pub use registry::discover;

/// Identity of one submodule, as declared in the modules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleEntry {
    /// Path relative to the parent repository root, `/`-separated. Unique.
    pub path: String,
    /// Final segment of `path`.
    pub name: String,
    /// `url` key of the block, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SubmoduleEntry {
    /// Creates an entry, deriving the name from the last path segment.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(path.as_str())
            .to_string();
        Self {
            path,
            name,
            url: None,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Raw observation of one submodule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcsFacts {
    pub branch: Option<String>,
    pub commits_ahead: u32,
    pub commits_behind: u32,
    pub has_local_changes: bool,
    /// Set when the branch query could not be answered.
    pub observation_failed: bool,
}

impl VcsFacts {
    /// Facts for a submodule that could not be observed at all.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            observation_failed: true,
            ..Self::default()
        }
    }

    /// `git rev-parse --abbrev-ref HEAD` reports `HEAD` when detached.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.branch.as_deref() == Some("HEAD")
    }
}

/// Composite status of one submodule.
///
/// `Unknown` means the submodule could not be observed; it is never `Clean`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Clean,
    Ahead,
    Behind,
    AheadAndBehind,
    Dirty,
    Unknown,
}

impl StatusKind {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Clean,
        Self::Ahead,
        Self::Behind,
        Self::AheadAndBehind,
        Self::Dirty,
        Self::Unknown,
    ];

    /// Stable key used in config files, preferences, and JSON.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Ahead => "ahead",
            Self::Behind => "behind",
            Self::AheadAndBehind => "ahead_and_behind",
            Self::Dirty => "dirty",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Clean => "Clean",
            Self::Ahead => "Ahead",
            Self::Behind => "Behind",
            Self::AheadAndBehind => "Ahead & Behind",
            Self::Dirty => "Dirty",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl FromStr for StatusKind {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == normalized)
            .ok_or_else(|| PrefsError::UnknownStatus(s.to_string()))
    }
}

/// Which actions the latest status makes meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub pull: bool,
    pub push: bool,
}

impl Eligibility {
    /// Whether `kind` is meaningful under this eligibility.
    #[must_use]
    pub const fn allows(self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Pull => self.pull,
            ActionKind::Push => self.push,
        }
    }
}

/// One submodule after observation and reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleSnapshot {
    pub entry: SubmoduleEntry,
    pub facts: VcsFacts,
    pub status: StatusKind,
}

impl SubmoduleSnapshot {
    /// Reduces `facts` and fuses them with `entry`.
    #[must_use]
    pub fn new(entry: SubmoduleEntry, facts: VcsFacts) -> Self {
        let status = reduce(&facts);
        Self {
            entry,
            facts,
            status,
        }
    }

    #[must_use]
    pub fn eligibility(&self) -> Eligibility {
        eligibility(&self.facts)
    }

    /// Human-readable summary of the status.
    #[must_use]
    pub fn message(&self) -> String {
        let facts = &self.facts;
        match self.status {
            StatusKind::Unknown => "Status unavailable".to_string(),
            StatusKind::Dirty => "Has local changes".to_string(),
            StatusKind::AheadAndBehind => format!(
                "Behind by {} commits, ahead by {}",
                facts.commits_behind, facts.commits_ahead
            ),
            StatusKind::Behind => format!("Needs Pull ({} commits behind)", facts.commits_behind),
            StatusKind::Ahead => format!("Needs Push ({} commits ahead)", facts.commits_ahead),
            StatusKind::Clean => "Clean & up to date".to_string(),
        }
    }
}

/// Snapshots from one refresh pass, in modules-file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSet {
    pub snapshots: Vec<SubmoduleSnapshot>,
    pub captured_at: DateTime<Utc>,
}

impl SnapshotSet {
    /// The set visible before the first refresh.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            snapshots: Vec::new(),
            captured_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[must_use]
    pub fn new(snapshots: Vec<SubmoduleSnapshot>, captured_at: DateTime<Utc>) -> Self {
        Self {
            snapshots,
            captured_at,
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&SubmoduleSnapshot> {
        self.snapshots.iter().find(|s| s.entry.path == path)
    }

    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.snapshots.iter().map(|s| s.entry.path.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for SnapshotSet {
    fn default() -> Self {
        Self::empty()
    }
}
