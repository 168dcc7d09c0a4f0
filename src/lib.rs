// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        status / watch / pull / push / icons
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          monitor          |
//!              |  snapshots, actions, watch|
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              cache      submodule   prefs
//!          time-gated   registry/obs  icons,
//!           snapshot    reducer/act   paths
//!                 |           |
//!                 +-----+-----+
//!                       v
//!                git (ShellBackend: query/pull/push)
//!
//!   +-----------------------------------------+
//!   |  core   process builder/runner/io       |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config    |
//!   +-----------------------------------------+
//! ```

pub mod cache;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod monitor;
pub mod prefs;
pub mod submodule;
