// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull/push command implementation for subwatch.

use anyhow::bail;

use crate::cli::args::ActionArgs;
use crate::cmd::render::outcome_line;
use crate::config::Config;
use crate::error::Result;
use crate::monitor::SubmoduleMonitor;
use crate::submodule::ActionKind;

/// Main handler for the pull and push commands.
///
/// Refreshes first so eligibility reflects the current state, then refreshes
/// again after the action and prints the new status line.
///
/// # Errors
///
/// Returns an error if the path is unknown, the action is not eligible and
/// `--force` was not given, or git reports a failure.
pub async fn run_action_command(kind: ActionKind, args: &ActionArgs, config: &Config) -> Result<()> {
    let monitor = SubmoduleMonitor::from_config(config)?;
    monitor.request_manual_refresh().await;

    let outcome = if args.force {
        monitor.request_action_unchecked(&args.path, kind).await
    } else {
        monitor.request_action(&args.path, kind).await?
    };
    println!("{}", outcome_line(&outcome));
    if !outcome.succeeded() {
        bail!("{kind} failed for '{}'", args.path);
    }

    let set = monitor.request_manual_refresh().await;
    if let Some(snapshot) = set.get(&args.path) {
        println!("{}: {}", snapshot.entry.path, snapshot.message());
    }
    Ok(())
}
