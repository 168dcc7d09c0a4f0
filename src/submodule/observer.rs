// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Observing submodules through git.
//!
//! ```text
//! observe_all(entries)
//!   for each entry: tokio::spawn
//!        |
//!        v
//!   Semaphore permit     (bounded parallelism across submodules)
//!   PathLocks[path]      (serialized within one submodule)
//!        |
//!        v
//!   branch -> ahead/behind -> dirty   (each with its own timeout)
//!        |
//!        v
//!   join handles awaited in entry order -> Vec<SubmoduleSnapshot>
//! ```
//!
//! Only the branch query can mark an observation as failed. The other queries
//! degrade to zero/false, since a submodule without an upstream legitimately
//! has nothing to report.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard, Semaphore};
use tracing::{debug, warn};

use super::{SubmoduleEntry, SubmoduleSnapshot, VcsFacts};
use crate::git::GitQuery;

/// Per-path async locks shared by observation and actions.
#[derive(Debug, Clone, Default)]
pub struct PathLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl PathLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other query or action runs against `path`.
    pub async fn acquire(&self, path: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.entry(path.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    /// Whether `path` is free right now.
    #[must_use]
    pub fn is_idle(&self, path: &str) -> bool {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(path).is_none_or(|lock| lock.try_lock().is_ok())
    }
}

/// Gathers `VcsFacts` for submodules under one parent repository.
pub struct VcsQueryClient<Q> {
    git: Arc<Q>,
    root: PathBuf,
    locks: PathLocks,
    limit: Arc<Semaphore>,
}

impl<Q> Clone for VcsQueryClient<Q> {
    fn clone(&self) -> Self {
        Self {
            git: Arc::clone(&self.git),
            root: self.root.clone(),
            locks: self.locks.clone(),
            limit: Arc::clone(&self.limit),
        }
    }
}

impl<Q: GitQuery + 'static> VcsQueryClient<Q> {
    /// Creates a client observing at most `parallelism` submodules at once.
    #[must_use]
    pub fn new(git: Arc<Q>, root: impl Into<PathBuf>, parallelism: usize) -> Self {
        Self {
            git,
            root: root.into(),
            locks: PathLocks::new(),
            limit: Arc::new(Semaphore::new(parallelism.max(1))),
        }
    }

    /// Shares a lock registry, e.g. with an `ActionDispatcher`.
    #[must_use]
    pub fn with_locks(mut self, locks: PathLocks) -> Self {
        self.locks = locks;
        self
    }

    #[must_use]
    pub const fn locks(&self) -> &PathLocks {
        &self.locks
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Observes one submodule, waiting for its path lock.
    pub async fn observe(&self, entry: &SubmoduleEntry) -> VcsFacts {
        let _guard = self.locks.acquire(&entry.path).await;
        query_facts(self.git.as_ref(), &self.root.join(&entry.path), &entry.path).await
    }

    /// Observes every entry concurrently and reduces the results.
    ///
    /// Output order matches `entries`. A failing or hanging submodule only
    /// affects its own snapshot.
    pub async fn observe_all(&self, entries: Vec<SubmoduleEntry>) -> Vec<SubmoduleSnapshot> {
        let handles: Vec<_> = entries
            .into_iter()
            .map(|entry| {
                let client = self.clone();
                let task_entry = entry.clone();
                let handle = tokio::spawn(async move {
                    let _permit = Arc::clone(&client.limit).acquire_owned().await.ok();
                    client.observe(&task_entry).await
                });
                (entry, handle)
            })
            .collect();

        let mut snapshots = Vec::with_capacity(handles.len());
        for (entry, handle) in handles {
            let facts = handle.await.unwrap_or_else(|e| {
                warn!(path = %entry.path, error = %e, "observation task failed");
                VcsFacts::failed()
            });
            snapshots.push(SubmoduleSnapshot::new(entry, facts));
        }
        snapshots
    }
}

/// Runs the three queries in `dir`.
async fn query_facts<Q: GitQuery + ?Sized>(git: &Q, dir: &Path, path: &str) -> VcsFacts {
    if !dir.join(".git").exists() {
        warn!(path, dir = %dir.display(), "submodule is not checked out");
        return VcsFacts::failed();
    }

    let mut facts = VcsFacts::default();

    match git.current_branch(dir).await {
        Ok(branch) => facts.branch = Some(branch),
        Err(e) => {
            warn!(path, error = %e, "branch query failed");
            facts.observation_failed = true;
            if e.is_tool_unavailable() {
                return facts;
            }
        }
    }

    match git.ahead_behind(dir).await {
        Ok(counts) => {
            facts.commits_behind = counts.behind;
            facts.commits_ahead = counts.ahead;
        }
        Err(e) if e.is_tool_unavailable() => {
            warn!(path, error = %e, "git became unavailable");
            facts.observation_failed = true;
            return facts;
        }
        Err(e) => debug!(path, error = %e, "no ahead/behind counts"),
    }

    match git.has_local_changes(dir).await {
        Ok(dirty) => facts.has_local_changes = dirty,
        Err(e) => debug!(path, error = %e, "dirty check failed, assuming clean"),
    }

    debug!(
        path,
        branch = ?facts.branch,
        ahead = facts.commits_ahead,
        behind = facts.commits_behind,
        dirty = facts.has_local_changes,
        failed = facts.observation_failed,
        "observed"
    );
    facts
}
