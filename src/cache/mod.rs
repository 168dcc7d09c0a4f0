// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Time-gated cache of the full snapshot set.
//!
//! ```text
//! current_snapshot() ──read──> RwLock<Arc<SnapshotSet>>   (never blocks on a pass)
//!                                   ^
//!                                   | swap (whole set, once per pass)
//! refresh_if_stale(now, interval) ─┐|
//! force_refresh() ─────────────────┤|
//!                                  v|
//!                      refresh_lock (tokio Mutex)
//!                          |  generation moved while waiting?
//!                          |     yes -> join: return the set just published
//!                          |     no  -> run pass
//!                          v
//!      registry::discover -> VcsQueryClient::observe_all -> publish
//! ```
//!
//! A dropped refresh future publishes nothing; its spawned observation tasks
//! finish on their own and are discarded.


use chrono::{DateTime, TimeDelta, Utc};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use crate::git::GitQuery;
use crate::submodule::registry::{self, MODULES_FILE};
use crate::submodule::{SnapshotSet, VcsQueryClient};

/// Cache of the latest published `SnapshotSet`.
pub struct RefreshCache<Q> {
    client: VcsQueryClient<Q>,
    modules_file: String,
    current: RwLock<Arc<SnapshotSet>>,
    generation: AtomicU64,
    refresh_lock: AsyncMutex<()>,
}

impl<Q: GitQuery + 'static> RefreshCache<Q> {
    /// Creates an empty cache over `client`'s root and the default modules file.
    #[must_use]
    pub fn new(client: VcsQueryClient<Q>) -> Self {
        Self::with_modules_file(client, MODULES_FILE)
    }

    #[must_use]
    pub fn with_modules_file(client: VcsQueryClient<Q>, modules_file: impl Into<String>) -> Self {
        Self {
            client,
            modules_file: modules_file.into(),
            current: RwLock::new(Arc::new(SnapshotSet::empty())),
            generation: AtomicU64::new(0),
            refresh_lock: AsyncMutex::new(()),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &VcsQueryClient<Q> {
        &self.client
    }

    #[must_use]
    pub fn modules_path(&self) -> PathBuf {
        self.client.root().join(&self.modules_file)
    }

    /// Last completed set; empty before the first refresh.
    #[must_use]
    pub fn current_snapshot(&self) -> Arc<SnapshotSet> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of sets published so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether the current set is older than `interval` at `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        if self.generation() == 0 {
            return true;
        }
        let captured_at = self.current_snapshot().captured_at;
        let interval = TimeDelta::from_std(interval).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(captured_at) > interval
    }

    /// Refreshes only if the current set is stale.
    ///
    /// Returns `true` if a new set was published, by this call or by an
    /// in-flight pass it joined.
    pub async fn refresh_if_stale(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        // Read before the staleness check so a pass published in between is
        // joined rather than repeated.
        let seen = self.generation();
        if !self.is_stale(now, interval) {
            return false;
        }
        let _guard = self.refresh_lock.lock().await;
        if self.generation() != seen {
            debug!("joined in-flight refresh");
            return true;
        }
        self.run_pass().await;
        true
    }

    /// Re-runs discovery and observation regardless of staleness.
    ///
    /// A caller arriving during an in-flight pass receives that pass's result.
    pub async fn force_refresh(&self) -> Arc<SnapshotSet> {
        let seen = self.generation();
        let _guard = self.refresh_lock.lock().await;
        if self.generation() != seen {
            debug!("joined in-flight refresh");
            return self.current_snapshot();
        }
        self.run_pass().await
    }

    /// One full pass. Caller holds `refresh_lock`.
    async fn run_pass(&self) -> Arc<SnapshotSet> {
        let started = Instant::now();
        let entries = registry::discover(self.client.root(), &self.modules_file).unwrap_or_else(|e| {
            warn!(error = %e, "submodule discovery failed, publishing empty set");
            Vec::new()
        });

        let snapshots = self.client.observe_all(entries).await;
        let set = Arc::new(SnapshotSet::new(snapshots, self.next_timestamp(Utc::now())));

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&set);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        info!(
            generation,
            submodules = set.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "published snapshot set"
        );
        set
    }

    /// `now`, nudged past the previous set's timestamp if the clock has not moved.
    fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let previous = self.current_snapshot().captured_at;
        if now > previous {
            now
        } else {
            previous + TimeDelta::nanoseconds(1)
        }
    }
}
