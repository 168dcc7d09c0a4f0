// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Icons command implementation for subwatch.

use crate::cli::args::{IconsArgs, IconsSubcommand};
use crate::config::Config;
use crate::error::Result;
use crate::prefs::PreferenceStore;
use crate::submodule::StatusKind;

/// Main handler for the icons command.
///
/// # Errors
///
/// Returns an error if the preference file cannot be read or written.
pub fn run_icons_command(args: &IconsArgs, config: &Config) -> Result<()> {
    let mut store = match config.monitor.prefs_path() {
        Some(path) => PreferenceStore::open(path, config.icons.clone())?,
        None => PreferenceStore::in_memory(config.icons.clone()),
    };

    match &args.subcommand {
        IconsSubcommand::List => {
            for line in format_icons(&store) {
                println!("{line}");
            }
        }
        IconsSubcommand::Set { status, asset } => {
            store.set_icon(*status, asset.as_str());
            store.save()?;
            println!("{} = {asset}", status.key());
        }
        IconsSubcommand::Reset { status: Some(status) } => {
            store.reset_icon(*status);
            store.save()?;
        }
        IconsSubcommand::Reset { status: None } => {
            store.reset_icons();
            store.save()?;
        }
    }
    Ok(())
}

/// One aligned line per status; stored overrides are marked.
#[must_use]
pub fn format_icons(store: &PreferenceStore) -> Vec<String> {
    let width = StatusKind::ALL
        .iter()
        .map(|s| s.key().len())
        .max()
        .unwrap_or(0);
    StatusKind::ALL
        .iter()
        .map(|&status| {
            let marker = if store.is_overridden(status) {
                " (override)"
            } else {
                ""
            };
            format!(
                "{:<width$} = {}{marker}",
                status.key(),
                store.icon_for(status).unwrap_or("-")
            )
        })
        .collect()
}
