// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::PreferenceStore;
use crate::config::types::IconsConfig;
use crate::error::PrefsError;
use crate::submodule::StatusKind;

fn defaults() -> IconsConfig {
    IconsConfig::from([
        (StatusKind::Clean, "icons/clean.png".to_string()),
        (StatusKind::Ahead, "icons/ahead.png".to_string()),
    ])
}

#[test]
fn test_absent_file_starts_empty() {
    let temp = tempfile::tempdir().expect("temp dir");
    let store = PreferenceStore::open(temp.path().join("prefs.json"), defaults()).expect("open");
    assert!(store.last_known_paths().is_empty());
    assert_eq!(store.icon_for(StatusKind::Clean), Some("icons/clean.png"));
    assert_eq!(store.icon_for(StatusKind::Dirty), None);
}

#[test]
fn test_overrides_win_over_defaults() {
    let mut store = PreferenceStore::in_memory(defaults());
    store.set_icon(StatusKind::Clean, "custom/ok.png");
    assert_eq!(store.icon_for(StatusKind::Clean), Some("custom/ok.png"));
    assert!(store.is_overridden(StatusKind::Clean));

    assert_eq!(store.reset_icon(StatusKind::Clean).as_deref(), Some("custom/ok.png"));
    assert_eq!(store.icon_for(StatusKind::Clean), Some("icons/clean.png"));
}

#[test]
fn test_each_status_keeps_its_own_icon() {
    let mut store = PreferenceStore::in_memory(IconsConfig::new());
    for kind in StatusKind::ALL {
        store.set_icon(kind, format!("icons/{}.png", kind.key()));
    }
    let icons = store.icons();
    assert_eq!(icons.len(), StatusKind::ALL.len());
    assert_eq!(icons[&StatusKind::Behind], "icons/behind.png");
    assert_eq!(icons[&StatusKind::AheadAndBehind], "icons/ahead_and_behind.png");
    assert_eq!(icons[&StatusKind::Dirty], "icons/dirty.png");
}

#[test]
fn test_save_and_reload() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = temp.path().join("nested/dir/prefs.json");

    let mut store = PreferenceStore::open(&path, defaults()).expect("open");
    store.set_icon(StatusKind::AheadAndBehind, "icons/split.png");
    assert!(store.set_last_known_paths(vec!["libs/a".into(), "libs/b".into()]));
    assert!(!store.set_last_known_paths(vec!["libs/a".into(), "libs/b".into()]));
    store.save().expect("save");

    let content = std::fs::read_to_string(&path).expect("read back");
    insta::assert_snapshot!(content.trim_end(), @r#"
    {
      "icons": {
        "ahead_and_behind": "icons/split.png"
      },
      "last_known_paths": [
        "libs/a",
        "libs/b"
      ]
    }
    "#);

    let reloaded = PreferenceStore::open(&path, defaults()).expect("reopen");
    assert_eq!(reloaded.icon_for(StatusKind::AheadAndBehind), Some("icons/split.png"));
    assert_eq!(reloaded.icon_for(StatusKind::Ahead), Some("icons/ahead.png"));
    assert_eq!(reloaded.last_known_paths(), ["libs/a", "libs/b"]);
}

#[test]
fn test_reset_icons_keeps_paths() {
    let mut store = PreferenceStore::in_memory(defaults());
    store.set_icon(StatusKind::Dirty, "d.png");
    store.set_last_known_paths(vec!["x".into()]);
    store.reset_icons();
    assert_eq!(store.icon_for(StatusKind::Dirty), None);
    assert_eq!(store.last_known_paths(), ["x"]);
    assert!(store.save().is_ok());
}

#[test]
fn test_corrupt_file_is_parse_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = temp.path().join("prefs.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = PreferenceStore::open(&path, defaults()).expect_err("corrupt");
    assert!(matches!(err, PrefsError::Parse { .. }), "{err:?}");
}

#[test]
fn test_unknown_status_key_is_parse_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = temp.path().join("prefs.json");
    std::fs::write(&path, r#"{"icons": {"unstaged": "u.png"}}"#).expect("write");

    assert!(PreferenceStore::open(&path, defaults()).is_err());
}

#[test]
fn test_missing_fields_default() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = temp.path().join("prefs.json");
    std::fs::write(&path, "{}").expect("write");

    let store = PreferenceStore::open(&path, IconsConfig::new()).expect("open");
    assert!(store.icons().is_empty());
    assert!(store.last_known_paths().is_empty());
}
