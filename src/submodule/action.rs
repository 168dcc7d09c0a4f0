// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull/push against a single submodule.
//!
//! The dispatcher is a mechanism, not a policy gate: it runs whatever it is
//! asked to. Eligibility is checked by `SubmoduleMonitor::request_action`.
//! Outcomes never trigger a refresh on their own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::{PathLocks, SubmoduleEntry};
use crate::git::GitMutation;

/// A mutating git action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Pull,
    Push,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pull => f.write_str("pull"),
            Self::Push => f.write_str("push"),
        }
    }
}

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActionResult {
    /// Git exited successfully; `output` is what it printed.
    Completed { output: String },
    /// Git failed, timed out, or could not be started.
    Failed { message: String },
}

/// Result of one action, reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub path: String,
    #[serde(flatten)]
    pub result: ActionResult,
}

impl ActionOutcome {
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.result, ActionResult::Completed { .. })
    }

    /// Git output on success, the failure message otherwise.
    #[must_use]
    pub fn message(&self) -> &str {
        match &self.result {
            ActionResult::Completed { output } => output,
            ActionResult::Failed { message } => message,
        }
    }
}

/// Runs pull/push in a submodule's working directory.
pub struct ActionDispatcher<M> {
    git: Arc<M>,
    root: PathBuf,
    locks: PathLocks,
}

impl<M: GitMutation> ActionDispatcher<M> {
    #[must_use]
    pub fn new(git: Arc<M>, root: impl Into<PathBuf>) -> Self {
        Self {
            git,
            root: root.into(),
            locks: PathLocks::new(),
        }
    }

    /// Shares a lock registry with the observer so actions never overlap a
    /// query against the same submodule.
    #[must_use]
    pub fn with_locks(mut self, locks: PathLocks) -> Self {
        self.locks = locks;
        self
    }

    /// Runs `kind` against `entry`. Failures are reported, never raised.
    pub async fn run_action(&self, kind: ActionKind, entry: &SubmoduleEntry) -> ActionOutcome {
        let _guard = self.locks.acquire(&entry.path).await;
        let dir = self.root.join(&entry.path);
        info!(action = %kind, path = %entry.path, "running");

        let result = match kind {
            ActionKind::Pull => self.git.pull(&dir).await,
            ActionKind::Push => self.git.push(&dir).await,
        };

        let result = match result {
            Ok(output) => {
                info!(action = %kind, path = %entry.path, "completed");
                ActionResult::Completed { output }
            }
            Err(e) => {
                warn!(action = %kind, path = %entry.path, error = %e, "failed");
                ActionResult::Failed {
                    message: e.to_string(),
                }
            }
        };

        ActionOutcome {
            kind,
            path: entry.path.clone(),
            result,
        }
    }
}
