// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!   observer / dispatcher
//!            |
//!            v
//!   ,------------------,
//!   | backend (traits) |
//!   '--+----------+----'
//!      |          |
//!      v          v
//!  GitQuery   GitMutation
//!  .branch    .pull
//!  .ahead_    .push
//!   behind
//!  .dirty
//!      \          /
//!       v        v
//!      ShellBackend (git CLI)
//!            |
//!            v
//!     query.rs parsers
//! ```

pub mod backend;
pub mod query;


pub use backend::{GitMutation, GitQuery, ShellBackend};
pub use query::AheadBehind;
