// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command arguments.
//!
//! ```text
//! status [--json]
//! watch  [--interval SECS] [--json]
//! pull   <PATH> [--force]      push <PATH> [--force]
//! icons  list | set <STATUS> <ASSET> | reset [STATUS]
//! ```

use clap::{Args, Subcommand};

use crate::submodule::StatusKind;

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Prints the snapshot set as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct WatchArgs {
    /// Staleness interval in seconds (default: monitor.refresh_interval_secs).
    #[arg(short = 'n', long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Prints each published set as one JSON line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `pull` and `push` commands.
#[derive(Debug, Clone, Args)]
pub struct ActionArgs {
    /// Submodule path as declared in the modules file.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Runs the action even if the current status does not call for it.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for the `icons` command.
#[derive(Debug, Clone, Args)]
pub struct IconsArgs {
    #[command(subcommand)]
    pub subcommand: IconsSubcommand,
}

/// Icon table subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum IconsSubcommand {
    /// Lists the effective icon for every status.
    List,

    /// Stores an icon override for one status.
    Set {
        /// Status name, e.g. `behind` or `ahead-and-behind`.
        #[arg(value_name = "STATUS")]
        status: StatusKind,
        /// Asset reference stored verbatim.
        #[arg(value_name = "ASSET")]
        asset: String,
    },

    /// Drops the override for one status, or all overrides.
    Reset {
        #[arg(value_name = "STATUS")]
        status: Option<StatusKind>,
    },
}
