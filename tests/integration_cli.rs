// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use subwatch::cli::args::IconsSubcommand;
use subwatch::cli::global::GlobalOptions;
use subwatch::cli::{Cli, Command};
use subwatch::cmd::icons::format_icons;
use subwatch::config::types::IconsConfig;
use subwatch::prefs::PreferenceStore;
use subwatch::submodule::StatusKind;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["subwatch", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["subwatch", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Status / Watch
// =============================================================================

#[test]
fn cli_status_defaults() {
    let cli = Cli::try_parse_from(["subwatch", "status"]).unwrap();
    let Some(Command::Status(args)) = cli.command else {
        panic!("expected status");
    };
    assert!(!args.json);
}

#[test]
fn cli_watch_json_with_interval() {
    let cli = Cli::try_parse_from(["subwatch", "watch", "--json", "--interval", "5"]).unwrap();
    let Some(Command::Watch(args)) = cli.command else {
        panic!("expected watch");
    };
    assert!(args.json);
    assert_eq!(args.interval, Some(5));
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_after_command() {
    let cli = Cli::try_parse_from(["subwatch", "status", "-C", "/srv/game", "-l", "2"]).unwrap();
    assert_eq!(cli.global.root.as_deref(), Some(std::path::Path::new("/srv/game")));
    assert_eq!(cli.global.log_level, Some(2));
}

#[test]
fn cli_file_log_level_overrides_log_level() {
    let global = GlobalOptions {
        log_level: Some(2),
        file_log_level: Some(5),
        ..GlobalOptions::default()
    };
    insta::assert_snapshot!(global.to_config_overrides().join("\n"), @r"
    global.output_log_level=2
    global.file_log_level=5
    ");
}

#[test]
fn cli_log_file_override() {
    let cli =
        Cli::try_parse_from(["subwatch", "--log-file", "logs/subwatch.log", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));
    assert_eq!(
        cli.global.to_config_overrides(),
        vec!["global.log_file=logs/subwatch.log".to_string()]
    );
}

// =============================================================================
// Icons
// =============================================================================

#[test]
fn cli_icons_reset_one() {
    let cli = Cli::try_parse_from(["subwatch", "icons", "reset", "DIRTY"]).unwrap();
    let Some(Command::Icons(args)) = cli.command else {
        panic!("expected icons");
    };
    assert!(matches!(
        args.subcommand,
        IconsSubcommand::Reset {
            status: Some(StatusKind::Dirty)
        }
    ));
}

#[test]
fn icons_listing_marks_overrides() {
    let defaults = IconsConfig::from([(StatusKind::Clean, "icons/clean.png".to_string())]);
    let mut store = PreferenceStore::in_memory(defaults);
    store.set_icon(StatusKind::Behind, "icons/down.png");

    insta::assert_snapshot!(format_icons(&store).join("\n"), @r"
    clean            = icons/clean.png
    ahead            = -
    behind           = icons/down.png (override)
    ahead_and_behind = -
    dirty            = -
    unknown          = -
    ");
}

#[test]
fn options_sources_are_comments() {
    use subwatch::cmd::config::format_sources;

    assert_eq!(format_sources(&[]), vec!["# sources: defaults only"]);
    insta::assert_snapshot!(
        format_sources(&["1. [optional] subwatch.toml".to_string()]).join("\n"),
        @r"
    # sources:
    #   1. [optional] subwatch.toml
    "
    );
}
