// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options command for subwatch.

use crate::config::Config;

/// Prints the config sources, then every effective option.
pub fn run_options_command(config: &Config, sources: &[String]) {
    for line in format_sources(sources) {
        println!("{line}");
    }
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Source lines as TOML comments, so the whole listing parses back.
#[must_use]
pub fn format_sources(sources: &[String]) -> Vec<String> {
    if sources.is_empty() {
        return vec!["# sources: defaults only".to_string()];
    }
    std::iter::once("# sources:".to_string())
        .chain(sources.iter().map(|s| format!("#   {s}")))
        .collect()
}
