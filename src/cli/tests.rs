// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::args::IconsSubcommand;
use crate::cli::{Cli, Command};
use crate::submodule::StatusKind;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["subwatch", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_status_json() {
    let cli = Cli::try_parse_from(["subwatch", "status", "--json"]).unwrap();
    let Some(Command::Status(args)) = cli.command else {
        panic!("expected status");
    };
    assert!(args.json);
}

#[test]
fn test_parse_watch_interval() {
    let cli = Cli::try_parse_from(["subwatch", "watch", "-n", "30"]).unwrap();
    let Some(Command::Watch(args)) = cli.command else {
        panic!("expected watch");
    };
    assert_eq!(args.interval, Some(30));
    assert!(!args.json);

    assert!(Cli::try_parse_from(["subwatch", "watch", "--interval", "0"]).is_err());
}

#[test]
fn test_parse_pull_and_push() {
    let cli = Cli::try_parse_from(["subwatch", "pull", "libs/engine"]).unwrap();
    let Some(Command::Pull(args)) = cli.command else {
        panic!("expected pull");
    };
    assert_eq!(args.path, "libs/engine");
    assert!(!args.force);

    let cli = Cli::try_parse_from(["subwatch", "push", "--force", "libs/ui"]).unwrap();
    let Some(Command::Push(args)) = cli.command else {
        panic!("expected push");
    };
    assert_eq!(args.path, "libs/ui");
    assert!(args.force);

    assert!(Cli::try_parse_from(["subwatch", "pull"]).is_err());
}

#[test]
fn test_parse_icons() {
    let cli = Cli::try_parse_from(["subwatch", "icons", "set", "ahead-and-behind", "split.png"])
        .unwrap();
    let Some(Command::Icons(args)) = cli.command else {
        panic!("expected icons");
    };
    assert!(matches!(
        args.subcommand,
        IconsSubcommand::Set { status: StatusKind::AheadAndBehind, ref asset } if asset == "split.png"
    ));

    let cli = Cli::try_parse_from(["subwatch", "icons", "reset"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Command::Icons(ref a)) if matches!(a.subcommand, IconsSubcommand::Reset { status: None })
    ));

    assert!(Cli::try_parse_from(["subwatch", "icons", "set", "sideways", "x.png"]).is_err());
}

#[test]
fn test_global_options_to_overrides() {
    let cli = Cli::try_parse_from([
        "subwatch",
        "-C",
        "/work/game",
        "-l",
        "4",
        "--json-logs",
        "--set",
        "git.query_timeout_secs=15",
        "--config",
        "a.toml",
        "--config",
        "b.toml",
        "status",
    ])
    .unwrap();

    assert_eq!(cli.global.configs.len(), 2);
    insta::assert_snapshot!(cli.global.to_config_overrides().join("\n"), @r"
    git.query_timeout_secs=15
    monitor.root=/work/game
    global.output_log_level=4
    global.file_log_level=4
    global.json_logs=true
    ");
}

#[test]
fn test_global_options_after_command() {
    let cli = Cli::try_parse_from([
        "subwatch",
        "pull",
        "libs/a",
        "--set",
        "git.executable=git2",
        "--set",
        "git.query_timeout_secs=3",
        "-C",
        "/r",
        "--log-level",
        "5",
    ])
    .unwrap();

    let Some(Command::Pull(ref args)) = cli.command else {
        panic!("expected pull");
    };
    assert_eq!(args.path, "libs/a");
    insta::assert_snapshot!(cli.global.to_config_overrides().join("\n"), @r"
    git.executable=git2
    git.query_timeout_secs=3
    monitor.root=/r
    global.output_log_level=5
    global.file_log_level=5
    ");
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["subwatch", "-l", "7", "status"]).is_err());
}

#[test]
fn test_no_command() {
    let cli = Cli::try_parse_from(["subwatch"]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.global.to_config_overrides().is_empty());
}
