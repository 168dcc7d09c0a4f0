// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for the status engine.
//!
//! `FakeGit` answers queries from an in-memory table keyed by the final
//! directory segment; `fixture_root` lays out checked-out submodule dirs;
//! `capture_logs` records tracing output of a synchronous call.

use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{GitError, GitResult};
use crate::git::{AheadBehind, GitMutation, GitQuery};

/// State of one fake submodule.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRepo {
    pub(crate) branch: Option<String>,
    pub(crate) behind: u32,
    pub(crate) ahead: u32,
    pub(crate) dirty: bool,
    /// `false` behaves like a branch without upstream.
    pub(crate) has_upstream: bool,
    /// Every query sleeps this long, then reports a timeout.
    pub(crate) hang: Option<Duration>,
    pub(crate) tool_missing: bool,
    pub(crate) action_fails: bool,
}

impl FakeRepo {
    pub(crate) fn on(branch: &str) -> Self {
        Self {
            branch: Some(branch.to_string()),
            has_upstream: true,
            ..Self::default()
        }
    }

    pub(crate) const fn counts(mut self, behind: u32, ahead: u32) -> Self {
        self.behind = behind;
        self.ahead = ahead;
        self
    }

    pub(crate) const fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }
}

/// In-memory `GitQuery` + `GitMutation`.
#[derive(Default)]
pub(crate) struct FakeGit {
    repos: Mutex<HashMap<String, FakeRepo>>,
    branch_calls: AtomicUsize,
    actions: Mutex<Vec<String>>,
    /// Added to every branch query, to widen race windows.
    pub(crate) latency: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub(crate) fn set(&self, name: &str, repo: FakeRepo) {
        self.repos
            .lock()
            .expect("repos lock")
            .insert(name.to_string(), repo);
    }

    pub(crate) fn branch_calls(&self) -> usize {
        self.branch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn actions(&self) -> Vec<String> {
        self.actions.lock().expect("actions lock").clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn repo(&self, dir: &Path) -> FakeRepo {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.repos
            .lock()
            .expect("repos lock")
            .get(&name)
            .cloned()
            .unwrap_or_default()
    }

    async fn gate(&self, dir: &Path, command: &str) -> GitResult<FakeRepo> {
        let repo = self.repo(dir);
        if repo.tool_missing {
            return Err(GitError::ToolUnavailable {
                tool: "git".to_string(),
            });
        }
        if let Some(hang) = repo.hang {
            tokio::time::sleep(hang).await;
            return Err(GitError::QueryTimeout {
                command: command.to_string(),
                timeout: hang,
            });
        }
        Ok(repo)
    }
}

impl GitQuery for FakeGit {
    fn current_branch<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>> {
        Box::pin(async move {
            self.branch_calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            let result = self.gate(dir, "git rev-parse").await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result?.branch.ok_or_else(|| GitError::EmptyOutput {
                command: "git rev-parse".to_string(),
            })
        })
    }

    fn ahead_behind<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<AheadBehind>> {
        Box::pin(async move {
            let repo = self.gate(dir, "git rev-list").await?;
            if !repo.has_upstream {
                return Err(GitError::CommandFailed {
                    command: "git rev-list".to_string(),
                    message: "no upstream configured".to_string(),
                });
            }
            Ok(AheadBehind {
                behind: repo.behind,
                ahead: repo.ahead,
            })
        })
    }

    fn has_local_changes<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<bool>> {
        Box::pin(async move { Ok(self.gate(dir, "git status").await?.dirty) })
    }
}

impl GitMutation for FakeGit {
    fn pull<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>> {
        Box::pin(async move { self.act("pull", dir) })
    }

    fn push<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>> {
        Box::pin(async move { self.act("push", dir) })
    }
}

impl FakeGit {
    fn act(&self, action: &str, dir: &Path) -> GitResult<String> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.actions
            .lock()
            .expect("actions lock")
            .push(format!("{action} {name}"));

        let mut repos = self.repos.lock().expect("repos lock");
        let repo = repos.entry(name).or_default();
        if repo.action_fails {
            return Err(GitError::CommandFailed {
                command: format!("git {action}"),
                message: "exited with code 1: rejected".to_string(),
            });
        }
        match action {
            "pull" => repo.behind = 0,
            _ => repo.ahead = 0,
        }
        Ok(format!("{action} ok"))
    }
}

/// Creates `root/<path>/.git` for every path, plus a matching modules file.
pub(crate) fn fixture_root(paths: &[&str]) -> TempDir {
    let temp = tempfile::tempdir().expect("temp dir");
    let mut modules = String::new();
    for path in paths {
        std::fs::create_dir_all(temp.path().join(path).join(".git")).expect("submodule dir");
        let name = path.rsplit('/').next().unwrap_or(path);
        modules.push_str(&format!("[submodule \"{name}\"]\n\tpath = {path}\n"));
    }
    std::fs::write(temp.path().join(".gitmodules"), modules).expect("modules file");
    temp
}

pub(crate) fn shared(git: FakeGit) -> Arc<FakeGit> {
    Arc::new(git)
}

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs `f` while capturing warn-and-above tracing output.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .with_target(false)
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.lock().expect("log buffer")).to_string();
    (value, logs)
}
