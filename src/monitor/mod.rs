// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Consumer-facing surface over the status engine.
//!
//! ```text
//!  consumer (CLI, UI, dashboard)
//!     |  snapshots()               -> Arc<SnapshotSet>   (never blocks)
//!     |  request_manual_refresh()  -> force_refresh
//!     |  request_action(path, k)   -> eligibility gate -> ActionDispatcher
//!     |  watch(interval, token, f) -> tick -> refresh_if_stale -> f(set)
//!     v
//!  SubmoduleMonitor
//!     |-- RefreshCache<B>     (VcsQueryClient, PathLocks) --+
//!     |-- ActionDispatcher<B> (same PathLocks) -------------+
//!     '-- PreferenceStore     (icons, last-known paths; written after publish)
//! ```
//!
//! Eligibility and icons are derived from the latest snapshot at read time;
//! the monitor stores neither.


use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::RefreshCache;
use crate::config::Config;
use crate::config::types::MonitorConfig;
use crate::error::{MonitorError, WatchResult};
use crate::git::{GitMutation, GitQuery, ShellBackend};
use crate::prefs::PreferenceStore;
use crate::submodule::{
    ActionDispatcher, ActionKind, ActionOutcome, Eligibility, PathLocks, SnapshotSet, StatusKind,
    SubmoduleEntry, VcsQueryClient,
};

/// Bounds on the pause between staleness checks in `watch`.
const MIN_TICK: Duration = Duration::from_millis(10);
const MAX_TICK: Duration = Duration::from_secs(1);

/// Status engine plus the operations a presentation layer needs.
pub struct SubmoduleMonitor<B = ShellBackend> {
    cache: RefreshCache<B>,
    dispatcher: ActionDispatcher<B>,
    prefs: Mutex<PreferenceStore>,
    interval: Duration,
}

impl SubmoduleMonitor<ShellBackend> {
    /// Builds a monitor over the git CLI from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::Prefs` if the preference file exists but cannot be
    /// loaded.
    pub fn from_config(config: &Config) -> WatchResult<Self> {
        let prefs = match config.monitor.prefs_path() {
            Some(path) => PreferenceStore::open(path, config.icons.clone())?,
            None => PreferenceStore::in_memory(config.icons.clone()),
        };
        let git = Arc::new(ShellBackend::from_config(&config.git));
        Ok(Self::new(git, &config.monitor, prefs))
    }
}

impl<B: GitQuery + GitMutation + 'static> SubmoduleMonitor<B> {
    #[must_use]
    pub fn new(git: Arc<B>, config: &MonitorConfig, prefs: PreferenceStore) -> Self {
        let locks = PathLocks::new();
        let client = VcsQueryClient::new(Arc::clone(&git), &config.root, config.parallelism())
            .with_locks(locks.clone());
        let dispatcher = ActionDispatcher::new(git, &config.root).with_locks(locks);

        Self {
            cache: RefreshCache::with_modules_file(client, config.modules_file.clone()),
            dispatcher,
            prefs: Mutex::new(prefs),
            interval: config.refresh_interval(),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &RefreshCache<B> {
        &self.cache
    }

    /// Configured staleness interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Latest published set, in modules-file order.
    #[must_use]
    pub fn snapshots(&self) -> Arc<SnapshotSet> {
        self.cache.current_snapshot()
    }

    /// Refreshes now, joining a pass already in flight.
    pub async fn request_manual_refresh(&self) -> Arc<SnapshotSet> {
        info!("manual refresh requested");
        let set = self.cache.force_refresh().await;
        self.record(&set);
        set
    }

    /// Refreshes if the latest set is older than `interval`. Returns whether
    /// a new set was published.
    pub async fn refresh_if_stale(&self, interval: Duration) -> bool {
        let refreshed = self.cache.refresh_if_stale(Utc::now(), interval).await;
        if refreshed {
            self.record(&self.snapshots());
        }
        refreshed
    }

    /// Which actions the latest status of `path` allows.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::UnknownSubmodule` if `path` is not in the set.
    pub fn eligibility(&self, path: &str) -> Result<Eligibility, MonitorError> {
        self.snapshots()
            .get(path)
            .map(crate::submodule::SubmoduleSnapshot::eligibility)
            .ok_or_else(|| MonitorError::UnknownSubmodule(path.to_string()))
    }

    /// Runs `kind` if the latest status makes it meaningful.
    ///
    /// The outcome does not refresh the cache; call
    /// `request_manual_refresh` afterwards for updated status.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::UnknownSubmodule` for a path not in the set and
    /// `MonitorError::ActionNotEligible` when the status does not allow `kind`.
    pub async fn request_action(
        &self,
        path: &str,
        kind: ActionKind,
    ) -> Result<ActionOutcome, MonitorError> {
        let set = self.snapshots();
        let snapshot = set
            .get(path)
            .ok_or_else(|| MonitorError::UnknownSubmodule(path.to_string()))?;

        if !snapshot.eligibility().allows(kind) {
            debug!(path, action = %kind, status = %snapshot.status, "action not eligible");
            return Err(MonitorError::ActionNotEligible {
                action: kind.to_string(),
                path: path.to_string(),
                status: snapshot.status.to_string(),
            });
        }
        Ok(self.dispatcher.run_action(kind, &snapshot.entry).await)
    }

    /// Runs `kind` without consulting eligibility.
    pub async fn request_action_unchecked(&self, path: &str, kind: ActionKind) -> ActionOutcome {
        let entry = self
            .snapshots()
            .get(path)
            .map_or_else(|| SubmoduleEntry::new(path), |s| s.entry.clone());
        self.dispatcher.run_action(kind, &entry).await
    }

    /// Display asset for `status` from the preference store.
    #[must_use]
    pub fn icon_for(&self, status: StatusKind) -> Option<String> {
        self.with_prefs(|prefs| prefs.icon_for(status).map(str::to_string))
    }

    pub fn with_prefs<R>(&self, f: impl FnOnce(&PreferenceStore) -> R) -> R {
        f(&self.prefs.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Mutates a copy of the preference store, saves it, and keeps the copy
    /// only once it is on disk.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::Prefs` if the store cannot be written. The store
    /// in memory is left unchanged.
    pub fn update_prefs<R>(&self, f: impl FnOnce(&mut PreferenceStore) -> R) -> WatchResult<R> {
        let mut prefs = self.prefs.lock().unwrap_or_else(PoisonError::into_inner);
        let mut staged = prefs.clone();
        let value = f(&mut staged);
        staged.save()?;
        *prefs = staged;
        Ok(value)
    }

    /// Refreshes whenever the latest set is older than `interval`, calling
    /// `on_publish` with each new set, until `token` is cancelled.
    ///
    /// Cancelling mid-refresh abandons the pass without publishing; git
    /// processes already started run to completion in the background.
    pub async fn watch<F>(&self, interval: Duration, token: &CancellationToken, mut on_publish: F)
    where
        F: FnMut(&SnapshotSet),
    {
        let mut ticker = tokio::time::interval(interval.clamp(MIN_TICK, MAX_TICK));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval = ?interval, "watching submodules");

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let refreshed = tokio::select! {
                biased;
                () = token.cancelled() => break,
                refreshed = self.refresh_if_stale(interval) => refreshed,
            };
            if refreshed {
                on_publish(&self.snapshots());
            }
        }
        info!("watch stopped");
    }

    /// Remembers the paths of a published set.
    ///
    /// Writes only when the paths changed, a single small file, so the save
    /// stays on the calling task and under the lock that orders it against
    /// `update_prefs`.
    fn record(&self, set: &SnapshotSet) {
        let mut prefs = self.prefs.lock().unwrap_or_else(PoisonError::into_inner);
        let mut staged = prefs.clone();
        if !staged.set_last_known_paths(set.paths()) {
            return;
        }
        match staged.save() {
            Ok(()) => *prefs = staged,
            Err(e) => warn!(error = %e, "failed to save preferences"),
        }
    }
}
