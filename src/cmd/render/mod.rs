// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text and JSON renderings of a snapshot set.
//!
//! ```text
//! engine  libs/engine  main        Needs Pull (2 commits behind)  [pull]    icons/behind.png
//! ui      libs/ui      (unknown)   Status unavailable
//! ```


use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::submodule::{
    ActionOutcome, Eligibility, SnapshotSet, StatusKind, SubmoduleSnapshot, VcsFacts,
};

const UNKNOWN_BRANCH: &str = "(unknown)";

/// One submodule as shown to a consumer.
#[derive(Debug, Clone, Serialize)]
pub struct SubmoduleView<'a> {
    pub name: &'a str,
    pub path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(flatten)]
    pub facts: &'a VcsFacts,
    pub status: StatusKind,
    pub message: String,
    pub eligibility: Eligibility,
    pub icon: Option<String>,
}

impl<'a> SubmoduleView<'a> {
    pub fn new(snapshot: &'a SubmoduleSnapshot, icon: Option<String>) -> Self {
        Self {
            name: &snapshot.entry.name,
            path: &snapshot.entry.path,
            url: snapshot.entry.url.as_deref(),
            facts: &snapshot.facts,
            status: snapshot.status,
            message: snapshot.message(),
            eligibility: snapshot.eligibility(),
            icon,
        }
    }

    fn branch(&self) -> &str {
        self.facts.branch.as_deref().unwrap_or(UNKNOWN_BRANCH)
    }

    fn actions(&self) -> String {
        let mut actions = Vec::new();
        if self.eligibility.pull {
            actions.push("pull");
        }
        if self.eligibility.push {
            actions.push("push");
        }
        if actions.is_empty() {
            String::new()
        } else {
            format!("[{}]", actions.join(","))
        }
    }
}

/// A whole snapshot set as shown to a consumer.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport<'a> {
    pub captured_at: DateTime<Utc>,
    pub submodules: Vec<SubmoduleView<'a>>,
}

impl<'a> StatusReport<'a> {
    /// Pairs each snapshot with the icon `icon_for` gives its status.
    pub fn new(set: &'a SnapshotSet, icon_for: impl Fn(StatusKind) -> Option<String>) -> Self {
        Self {
            captured_at: set.captured_at,
            submodules: set
                .snapshots
                .iter()
                .map(|s| SubmoduleView::new(s, icon_for(s.status)))
                .collect(),
        }
    }

    /// Column-aligned summary lines, one per submodule.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let name_w = self.width(|v| v.name.len());
        let path_w = self.width(|v| v.path.len());
        let branch_w = self.width(|v| v.branch().len());
        let message_w = self.width(|v| v.message.len());
        let actions_w = self.width(|v| v.actions().len());

        self.submodules
            .iter()
            .map(|v| {
                let line = format!(
                    "{:<name_w$}  {:<path_w$}  {:<branch_w$}  {:<message_w$}  {:<actions_w$}  {}",
                    v.name,
                    v.path,
                    v.branch(),
                    v.message,
                    v.actions(),
                    v.icon.as_deref().unwrap_or_default(),
                );
                line.trim_end().to_string()
            })
            .collect()
    }

    /// Single-line JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn width(&self, f: impl Fn(&SubmoduleView<'a>) -> usize) -> usize {
        self.submodules.iter().map(f).max().unwrap_or(0)
    }
}

/// One line describing an action outcome.
#[must_use]
pub fn outcome_line(outcome: &ActionOutcome) -> String {
    if outcome.succeeded() {
        format!("{} {}: done", outcome.kind, outcome.path)
    } else {
        format!("{} {}: {}", outcome.kind, outcome.path, outcome.message())
    }
}
