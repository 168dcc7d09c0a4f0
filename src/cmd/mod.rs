// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   status, watch, action (pull/push), icons, config
//! ```

pub mod action;
pub mod config;
pub mod icons;
pub mod render;
pub mod status;
pub mod watch;
