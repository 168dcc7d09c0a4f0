// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> ShellBackend::query   (KILL_ON_TIMEOUT)
//! GitMutation (write) --> ShellBackend::action  (detach on timeout)
//!
//! every invocation: cwd = submodule dir
//!                   GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never
//! ```
//!
//! Traits return boxed futures so observers and dispatchers can be generic
//! over a test double.

use futures_util::future::BoxFuture;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::query::{AheadBehind, is_dirty, parse_ahead_behind, parse_branch};
use crate::config::types::GitConfig;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, StreamFlags};
use crate::error::{GitError, GitResult};

// --- Query Trait (Read-only operations) ---

/// Read-only git queries against one working directory.
pub trait GitQuery: Send + Sync {
    /// Current branch name; `HEAD` when detached.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the query fails, times out, or prints nothing.
    fn current_branch<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>>;

    /// Commit counts relative to the upstream; malformed output is `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the query fails, e.g. when there is no upstream.
    fn ahead_behind<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<AheadBehind>>;

    /// Whether the working tree has uncommitted or untracked changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the query fails or times out.
    fn has_local_changes<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<bool>>;
}

// --- Mutation Trait (Write operations) ---

/// Git operations that modify repository state.
pub trait GitMutation: Send + Sync {
    /// `git pull`, returning its output.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the pull fails or exceeds the action timeout.
    fn pull<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>>;

    /// `git push`, returning its output.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push fails or exceeds the action timeout.
    fn push<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>>;
}

// --- ShellBackend Implementation (Git CLI) ---

/// Git CLI backend.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    program: String,
    query_timeout: Duration,
    action_timeout: Duration,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::from_config(&GitConfig::default())
    }
}

impl ShellBackend {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_config(config: &GitConfig) -> Self {
        Self {
            program: config.executable.clone(),
            query_timeout: config.query_timeout(),
            action_timeout: config.action_timeout(),
        }
    }

    #[must_use]
    pub const fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds a git invocation in `dir`. Sets `GCM_INTERACTIVE=never` and
    /// `GIT_TERMINAL_PROMPT=0`.
    fn command(&self, dir: &Path, args: &[&str]) -> GitResult<ProcessBuilder> {
        let display = format!("git {}", args.join(" "));
        let builder = ProcessBuilder::which(&self.program)
            .map_err(|e| GitError::from_process(&display, e))?;
        Ok(builder
            .name("git")
            .args(args)
            .cwd(dir)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0"))
    }

    /// Runs a read-only query and returns trimmed stdout.
    ///
    /// Stderr is logged, never parsed. Timed-out queries are killed; they
    /// hold no locks thanks to `--no-optional-locks`.
    async fn query(&self, dir: &Path, args: &[&str]) -> GitResult<String> {
        let display = format!("git {}", args.join(" "));
        let output = self
            .command(dir, args)?
            .capture_stdout()
            .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
            .flag(ProcessFlags::KILL_ON_TIMEOUT)
            .timeout(self.query_timeout)
            .run()
            .await
            .map_err(|e| GitError::from_process(&display, e))?;
        Ok(output.stdout().trim_end().to_string())
    }

    /// Runs a mutating action and returns its combined output.
    ///
    /// A timed-out action is reported as failed and left to finish in the
    /// background.
    async fn action(&self, dir: &Path, args: &[&str]) -> GitResult<String> {
        let display = format!("git {}", args.join(" "));
        let output = self
            .command(dir, args)?
            .stdout_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
            .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
            .timeout(self.action_timeout)
            .run()
            .await
            .map_err(|e| GitError::from_process(&display, e))?;

        let mut text = output.stdout().trim_end().to_string();
        let stderr = output.stderr().trim_end();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr);
        }
        Ok(text)
    }

    async fn current_branch(&self, dir: &Path) -> GitResult<String> {
        const ARGS: [&str; 3] = ["rev-parse", "--abbrev-ref", "HEAD"];
        let stdout = self.query(dir, &ARGS).await?;
        parse_branch(&stdout).ok_or_else(|| GitError::EmptyOutput {
            command: format!("git {}", ARGS.join(" ")),
        })
    }

    async fn ahead_behind(&self, dir: &Path) -> GitResult<AheadBehind> {
        let stdout = self
            .query(dir, &["rev-list", "--left-right", "--count", "@{u}...HEAD"])
            .await?;
        Ok(parse_ahead_behind(&stdout).unwrap_or_else(|| {
            debug!(dir = %dir.display(), output = %stdout, "unexpected rev-list output, assuming no drift");
            AheadBehind::default()
        }))
    }

    async fn has_local_changes(&self, dir: &Path) -> GitResult<bool> {
        let stdout = self
            .query(dir, &["--no-optional-locks", "status", "--porcelain"])
            .await?;
        Ok(is_dirty(&stdout))
    }

    async fn pull(&self, dir: &Path) -> GitResult<String> {
        self.action(dir, &["pull"]).await
    }

    async fn push(&self, dir: &Path) -> GitResult<String> {
        self.action(dir, &["push"]).await
    }
}

impl GitQuery for ShellBackend {
    fn current_branch<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>> {
        Box::pin(self.current_branch(dir))
    }

    fn ahead_behind<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<AheadBehind>> {
        Box::pin(self.ahead_behind(dir))
    }

    fn has_local_changes<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<bool>> {
        Box::pin(self.has_local_changes(dir))
    }
}

impl GitMutation for ShellBackend {
    fn pull<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>> {
        Box::pin(self.pull(dir))
    }

    fn push<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, GitResult<String>> {
        Box::pin(self.push(dir))
    }
}
