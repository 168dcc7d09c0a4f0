// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML files and layered sources.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use subwatch::config::Config;
use subwatch::config::loader::ConfigLoader;
use subwatch::logging::LogLevel;
use subwatch::submodule::StatusKind;

// =============================================================================
// Loading from TOML files
// =============================================================================

#[test]
fn config_from_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("subwatch.toml");
    fs::write(
        &path,
        r#"
[monitor]
root = "/srv/game"
modules_file = "deps.modules"

[icons]
behind = "icons/down.png"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.monitor.root, PathBuf::from("/srv/game"));
    assert_eq!(config.monitor.modules_file, "deps.modules");
    assert_eq!(
        config.icons.get(&StatusKind::Behind).map(String::as_str),
        Some("icons/down.png")
    );
}

#[test]
fn config_missing_required_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(temp.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_missing_optional_file_uses_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new().add_toml_file_optional(temp.path().join("absent.toml"));
    assert!(loader.loaded_files().is_empty());

    let config = loader.build().unwrap();
    assert_eq!(config.monitor.refresh_interval(), Duration::from_secs(10));
    assert_eq!(config.git.executable, "git");
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_file_wins() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("base.toml");
    let local = temp.path().join("local.toml");
    fs::write(
        &base,
        "[git]\nquery_timeout_secs = 4\naction_timeout_secs = 60\n",
    )
    .unwrap();
    fs::write(&local, "[git]\nquery_timeout_secs = 12\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file_optional(&local);
    assert_eq!(loader.format_loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.git.query_timeout(), Duration::from_secs(12));
    assert_eq!(config.git.action_timeout(), Duration::from_secs(60));
}

#[test]
fn config_env_overrides_file() {
    // Unique prefix so no other test sees the variable.
    unsafe {
        std::env::set_var("SUBWATCHITEST_GIT__QUERY_TIMEOUT_SECS", "21");
        std::env::set_var("SUBWATCHITEST_MONITOR__MAX_PARALLEL", "3");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[git]\nquery_timeout_secs = 5\n")
        .with_env_prefix("SUBWATCHITEST")
        .build()
        .unwrap();
    assert_eq!(config.git.query_timeout_secs, 21);
    assert_eq!(config.monitor.max_parallel, 3);
}

#[test]
fn config_set_overrides_everything() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 2\n")
        .set_assignment("global.output_log_level=5")
        .unwrap()
        .set_assignment("monitor.prefs_file = /tmp/prefs.json")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
    assert_eq!(
        config.monitor.prefs_path(),
        Some(PathBuf::from("/tmp/prefs.json"))
    );
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn config_rejects_zero_interval() {
    let err = Config::parse("[monitor]\nrefresh_interval_secs = 0\n").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'refresh_interval_secs' in section '[monitor]': must be greater than zero");
}

#[test]
fn config_rejects_empty_executable() {
    assert!(Config::parse("[git]\nexecutable = \"\"\n").is_err());
}

#[test]
fn config_options_listing() {
    let config = Config::parse(
        r#"
[monitor]
root = "/srv/game"

[icons]
dirty = "icons/pencil.png"
"#,
    )
    .unwrap();
    let options = config.format_options();
    assert!(options.iter().any(|l| l.starts_with("icons.dirty") && l.ends_with("= icons/pencil.png")));
    assert!(options.iter().any(|l| l.starts_with("monitor.root") && l.ends_with("= /srv/game")));
    assert!(options.windows(2).all(|w| w[0] <= w[1]));
}
