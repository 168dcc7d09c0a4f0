// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Folding raw facts into a composite status.
//!
//! ```text
//! observation_failed ─────────────> Unknown
//! has_local_changes  ─────────────> Dirty        (reduce only)
//! behind > 0 && ahead > 0 ────────> AheadAndBehind
//! behind > 0 ─────────────────────> Behind
//! ahead > 0  ─────────────────────> Ahead
//! otherwise  ─────────────────────> Clean
//! ```
//!
//! The order is a tie-break and must not change.

use super::{Eligibility, StatusKind, VcsFacts};

/// Composite status shown to the consumer.
#[must_use]
pub fn reduce(facts: &VcsFacts) -> StatusKind {
    if facts.observation_failed {
        return StatusKind::Unknown;
    }
    if facts.has_local_changes {
        return StatusKind::Dirty;
    }
    drift(facts)
}

/// Status ignoring local changes; drives action eligibility.
#[must_use]
pub fn drift(facts: &VcsFacts) -> StatusKind {
    if facts.observation_failed {
        return StatusKind::Unknown;
    }
    match (facts.commits_behind > 0, facts.commits_ahead > 0) {
        (true, true) => StatusKind::AheadAndBehind,
        (true, false) => StatusKind::Behind,
        (false, true) => StatusKind::Ahead,
        (false, false) => StatusKind::Clean,
    }
}

/// Pull when behind, push when ahead; both when diverged.
#[must_use]
pub fn eligibility(facts: &VcsFacts) -> Eligibility {
    let status = drift(facts);
    Eligibility {
        pull: matches!(status, StatusKind::Behind | StatusKind::AheadAndBehind),
        push: matches!(status, StatusKind::Ahead | StatusKind::AheadAndBehind),
    }
}
