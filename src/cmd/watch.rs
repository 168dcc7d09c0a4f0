// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Watch command implementation for subwatch.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::cli::args::WatchArgs;
use crate::cmd::render::StatusReport;
use crate::config::Config;
use crate::error::Result;
use crate::monitor::SubmoduleMonitor;

/// Main handler for the watch command. Runs until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the preference file cannot be loaded.
pub async fn run_watch_command(args: &WatchArgs, config: &Config) -> Result<()> {
    let monitor = SubmoduleMonitor::from_config(config)?;
    let interval = args
        .interval
        .map_or_else(|| monitor.interval(), Duration::from_secs);

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, stopping watch...");
            signal_token.cancel();
        }
    });

    monitor
        .watch(interval, &cancel_token, |set| {
            let report = StatusReport::new(set, |status| monitor.icon_for(status));
            if args.json {
                match report.to_json() {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::error!(error = %e, "failed to serialize snapshot set"),
                }
            } else {
                println!("--- {} ---", set.captured_at.format("%Y-%m-%d %H:%M:%S UTC"));
                for line in report.lines() {
                    println!("{line}");
                }
            }
        })
        .await;
    Ok(())
}
