// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (each returns its captured text)
//!   wait (or timeout)
//!     timeout + KILL_ON_TIMEOUT --> kill, reap, Timeout error
//!     timeout otherwise         --> detach waiter task, Timeout error
//!   --> ProcessOutput { stdout, stderr, exit_code }
//! ```

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::{ProcessError, ProcessResult};

/// Spawns a reader task for one stream if its output is wanted.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    stream.map(|stream| {
        let name = process_name.to_string();
        tokio::spawn(async move { read_stream(stream, flags, &name, stream_name).await })
    })
}

/// Waits for a reader task and returns what it captured.
async fn collect(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

/// Hands a still-running child to a background task that reaps it.
///
/// The process keeps running until it exits on its own; nothing is killed.
fn detach(name: &str, mut child: Child) {
    let name = name.to_string();
    let pid = child.id();
    debug!(process = %name, pid = ?pid, "detaching process after timeout");
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => debug!(process = %name, pid = ?pid, code = ?status.code(), "detached process exited"),
            Err(e) => warn!(process = %name, pid = ?pid, error = %e, "failed waiting for detached process"),
        }
    });
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O capture and waiting for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        command_line: &str,
        mut child: Child,
    ) -> ProcessResult<ProcessOutput> {
        let stdout_handle = spawn_reader(child.stdout.take(), self.stdout, name, "stdout");
        let stderr_handle = spawn_reader(child.stderr.take(), self.stderr, name, "stderr");

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    return Err(self
                        .handle_timeout(name, command_line, child, limit, [stdout_handle, stderr_handle])
                        .await);
                }
            },
            None => child.wait().await,
        };

        let exit_status = waited.map_err(|e| ProcessError::OutputError {
            command: command_line.to_string(),
            message: e.to_string(),
        })?;

        let stdout = collect(stdout_handle).await;
        let stderr = collect(stderr_handle).await;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            keep_if(stdout, self.stdout),
            keep_if(stderr, self.stderr),
        ))
    }

    /// Resolves an expired timeout by killing or detaching the child.
    ///
    /// Reader tasks are aborted rather than awaited: a grandchild holding the
    /// pipe open would otherwise keep us waiting past the deadline.
    async fn handle_timeout(
        &self,
        name: &str,
        command_line: &str,
        mut child: Child,
        limit: Duration,
        readers: [Option<JoinHandle<String>>; 2],
    ) -> ProcessError {
        warn!(process = %name, timeout = ?limit, "Process timed out");
        for handle in readers.into_iter().flatten() {
            handle.abort();
        }

        if self.flags.contains(ProcessFlags::KILL_ON_TIMEOUT) {
            if let Err(e) = child.kill().await {
                warn!(process = %name, error = %e, "failed to kill timed out process");
            }
        } else {
            detach(name, child);
        }

        ProcessError::Timeout {
            command: command_line.to_string(),
            timeout: limit,
        }
    }
}

fn keep_if(captured: String, flags: StreamFlags) -> String {
    if flags.contains(StreamFlags::KEEP_IN_STRING) {
        captured
    } else {
        String::new()
    }
}

/// Reads a stream line by line, forwarding to the log and/or keeping it.
///
/// Invalid UTF-8 is replaced rather than ending the read.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut captured = String::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = %stream_name, line = %line, "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    if !captured.is_empty() {
                        captured.push('\n');
                    }
                    captured.push_str(line);
                }
            }
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }

    captured
}
