// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::{Duration, Instant};

use super::builder::{ProcessBuilder, ProcessFlags, StreamFlags};
use crate::error::ProcessError;

#[cfg(unix)]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").args(["-c", script])
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .args(["hello"])
        .capture_stdout()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout(), @"hello");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_non_zero_exit_carries_stderr() {
    let err = sh("echo 'fatal: broken' >&2; exit 3")
        .capture_stdout()
        .stderr_flags(StreamFlags::KEEP_IN_STRING)
        .run()
        .await
        .expect_err("non-zero exit should fail");

    match err {
        ProcessError::NonZeroExit { code, stderr, .. } => {
            assert_eq!(code, 3);
            assert_eq!(stderr, "fatal: broken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_env_is_layered() {
    let output = sh("echo \"$SUBWATCH_TEST_VAR:${PATH:+has-path}\"")
        .env("SUBWATCH_TEST_VAR", "test_value")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    insta::assert_snapshot!(output.stdout(), @"test_value:has-path");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cwd() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(dir.path().join("marker.txt"), "x").expect("failed to write marker");

    let output = ProcessBuilder::new("ls")
        .cwd(dir.path())
        .capture_stdout()
        .run()
        .await
        .expect("ls should succeed");

    assert_eq!(output.stdout(), "marker.txt");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_stderr_not_kept_when_only_logged() {
    let output = sh("echo out; echo err >&2")
        .capture_stdout()
        .stderr_flags(StreamFlags::FORWARD_TO_LOG)
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout(), "out");
    assert_eq!(output.stderr(), "");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_captures_many_lines() {
    let output = sh("i=0; while [ $i -lt 500 ]; do echo line$i; i=$((i+1)); done")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout().lines().count(), 500);
    assert_eq!(output.stdout().lines().last(), Some("line499"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout_kills() {
    let started = Instant::now();
    let err = sh("exec sleep 10")
        .flag(ProcessFlags::KILL_ON_TIMEOUT)
        .timeout(Duration::from_millis(200))
        .capture_stdout()
        .stderr_flags(StreamFlags::KEEP_IN_STRING)
        .run()
        .await
        .expect_err("sleep should time out");

    assert!(matches!(err, ProcessError::Timeout { .. }), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout_detaches_without_kill() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let marker = dir.path().join("finished");

    let err = sh(&format!("sleep 1; touch '{}'", marker.display()))
        .timeout(Duration::from_millis(100))
        .stdout_flags(StreamFlags::BIT_BUCKET)
        .stderr_flags(StreamFlags::BIT_BUCKET)
        .run()
        .await
        .expect_err("script should time out");
    assert!(matches!(err, ProcessError::Timeout { .. }), "got {err:?}");

    // The detached process keeps running and finishes on its own.
    let deadline = Instant::now() + Duration::from_secs(10);
    while !marker.exists() && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(marker.exists(), "detached process should run to completion");
}

#[tokio::test]
async fn test_spawn_failure_is_typed() {
    let err = ProcessBuilder::new("subwatch-definitely-not-a-real-binary")
        .run()
        .await
        .expect_err("spawn should fail");
    assert!(matches!(err, ProcessError::SpawnFailed { .. }), "got {err:?}");
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "subwatch-definitely-not-a-real-binary";
    assert!(ProcessBuilder::find(program).is_none());
    let err = ProcessBuilder::which(program).expect_err("lookup should fail");
    insta::assert_snapshot!(
        err.to_string(),
        @"executable not found: 'subwatch-definitely-not-a-real-binary' (not in PATH)"
    );
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("/usr/bin/git")
        .args(["commit", "-m", "two words"])
        .name("git");
    insta::assert_snapshot!(builder.command_line(), @r#"git commit -m "two words""#);
}
