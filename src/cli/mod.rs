// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for subwatch using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! subwatch [global options] <command>
//! status [--json]
//! watch [--interval SECS] [--json]
//! pull <PATH> [--force]
//! push <PATH> [--force]
//! icons {list|set|reset}
//! options
//! version
//! ```

pub mod args;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::args::{ActionArgs, IconsArgs, StatusArgs, WatchArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Git submodule status monitor.
#[derive(Debug, Parser)]
#[command(
    name = "subwatch",
    author,
    version,
    about = "Git submodule status monitor",
    long_about = "subwatch Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reports, per submodule of a git repository, whether it is clean,\n\
                  ahead or behind its upstream, or has local changes. Run\n\
                  `subwatch status` for a one-shot report or `subwatch watch` to\n\
                  refresh periodically. See `subwatch <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  subwatch reads `subwatch.toml` from the current directory if it\n\
                  exists, then every file given with --config in order. SUBWATCH_*\n\
                  environment variables (e.g. SUBWATCH_GIT__EXECUTABLE) and --set\n\
                  options are applied on top."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists the config sources and all options with their values.
    Options,

    /// Refreshes once and prints the status of every submodule.
    Status(StatusArgs),

    /// Refreshes periodically until interrupted.
    Watch(WatchArgs),

    /// Pulls one submodule.
    Pull(ActionArgs),

    /// Pushes one submodule.
    Push(ActionArgs),

    /// Shows or edits the status icon table.
    Icons(IconsArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
