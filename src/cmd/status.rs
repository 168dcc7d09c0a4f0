// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status command implementation for subwatch.

use crate::cli::args::StatusArgs;
use crate::cmd::render::StatusReport;
use crate::config::Config;
use crate::error::Result;
use crate::monitor::SubmoduleMonitor;

/// Main handler for the status command.
///
/// # Errors
///
/// Returns an error if the preference file cannot be loaded or the report
/// cannot be serialized.
pub async fn run_status_command(args: &StatusArgs, config: &Config) -> Result<()> {
    let monitor = SubmoduleMonitor::from_config(config)?;
    let set = monitor.request_manual_refresh().await;
    let report = StatusReport::new(&set, |status| monitor.icon_for(status));

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else if report.submodules.is_empty() {
        println!("No submodules found");
    } else {
        for line in report.lines() {
            println!("{line}");
        }
    }
    Ok(())
}
