// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interpreting git query output.
//!
//! ```text
//! rev-parse --abbrev-ref HEAD           "main\n"      -> Some("main")
//! rev-list --left-right --count A...B   "2\t3\n"      -> behind 2, ahead 3
//! status --porcelain                    " M file\n"   -> dirty
//! ```
//!
//! All parsers trim trailing whitespace first and never fail.

use serde::{Deserialize, Serialize};

/// Commit counts relative to the upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AheadBehind {
    pub behind: u32,
    pub ahead: u32,
}

/// Branch name from `rev-parse --abbrev-ref HEAD`, `None` when empty.
#[must_use]
pub fn parse_branch(stdout: &str) -> Option<String> {
    let branch = stdout.trim_end().lines().next()?.trim();
    (!branch.is_empty()).then(|| branch.to_string())
}

/// Counts from `rev-list --left-right --count @{u}...HEAD`.
///
/// Left is behind, right is ahead. Anything that is not exactly two
/// non-negative integers yields `None`.
#[must_use]
pub fn parse_ahead_behind(stdout: &str) -> Option<AheadBehind> {
    let mut fields = stdout.trim_end().split_whitespace();
    let behind = fields.next()?.parse().ok()?;
    let ahead = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(AheadBehind { behind, ahead })
}

/// Any output from `status --porcelain` means uncommitted changes.
#[must_use]
pub fn is_dirty(stdout: &str) -> bool {
    !stdout.trim_end().is_empty()
}
