// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule discovery from the modules file.
//!
//! ```text
//! [submodule "engine"]      <- opens a block
//!     path = libs/engine    <- entry path, name = "engine"
//!     url = ../engine.git   <- kept for display
//! [core]                    <- any other header closes the block
//!     path = ignored
//! ```
//!
//! Malformed input is skipped with a warning; discovery itself only fails
//! when the file exists but cannot be read.

use regex::Regex;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::SubmoduleEntry;
use crate::error::RegistryError;

/// Default modules file name.
pub const MODULES_FILE: &str = ".gitmodules";

struct LinePatterns {
    submodule_header: Regex,
    any_header: Regex,
    key_value: Regex,
}

fn line_patterns() -> Option<&'static LinePatterns> {
    static PATTERNS: OnceLock<Option<LinePatterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(LinePatterns {
                submodule_header: Regex::new(r#"^\s*\[\s*submodule(?:\s+"([^"]*)")?\s*\]"#)
                    .ok()?,
                any_header: Regex::new(r"^\s*\[[^\]]*\]").ok()?,
                key_value: Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_.-]*)\s*=\s*(.*?)\s*$").ok()?,
            })
        })
        .as_ref()
}

/// Reads `root/modules_file` and returns its submodules in file order.
///
/// An absent file yields an empty list.
///
/// # Errors
///
/// Returns `RegistryError::Read` if the file exists but cannot be read.
pub fn discover(root: &Path, modules_file: &str) -> Result<Vec<SubmoduleEntry>, RegistryError> {
    let path = root.join(modules_file);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no modules file, no submodules");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(RegistryError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let entries = parse(&content);
    debug!(
        path = %path.display(),
        count = entries.len(),
        "discovered submodules"
    );
    Ok(entries)
}

#[derive(Default)]
struct PendingBlock {
    label: Option<String>,
    line: usize,
    path: Option<String>,
    url: Option<String>,
}

enum Section {
    Outside,
    Submodule(PendingBlock),
    Other,
}

/// Parses modules file content.
#[must_use]
pub fn parse(content: &str) -> Vec<SubmoduleEntry> {
    let Some(patterns) = line_patterns() else {
        warn!("submodule line patterns failed to compile");
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let mut section = Section::Outside;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(caps) = patterns.submodule_header.captures(line) {
            finish_block(section, &mut entries, &mut seen);
            section = Section::Submodule(PendingBlock {
                label: caps.get(1).map(|m| m.as_str().to_string()),
                line: line_no,
                ..PendingBlock::default()
            });
            continue;
        }
        if patterns.any_header.is_match(line) {
            finish_block(section, &mut entries, &mut seen);
            section = Section::Other;
            continue;
        }

        let Some(caps) = patterns.key_value.captures(line) else {
            continue;
        };
        let key = caps.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
        let value = unquote(caps.get(2).map_or("", |m| m.as_str()));

        match (&mut section, key.as_str()) {
            (Section::Outside, "path") => {
                warn!(line = line_no, value = %value, "path outside any submodule section, skipped");
            }
            (Section::Submodule(block), "path") => {
                if block.path.is_some() {
                    debug!(line = line_no, "repeated path key, last one wins");
                }
                block.path = Some(value);
            }
            (Section::Submodule(block), "url") => block.url = Some(value),
            _ => {}
        }
    }
    finish_block(section, &mut entries, &mut seen);

    entries
}

fn finish_block(section: Section, entries: &mut Vec<SubmoduleEntry>, seen: &mut HashSet<String>) {
    let Section::Submodule(block) = section else {
        return;
    };
    let label = block.label.as_deref().unwrap_or("");

    let Some(path) = block.path.as_deref().map(normalize_path).filter(|p| !p.is_empty()) else {
        warn!(line = block.line, submodule = label, "submodule section has no path, skipped");
        return;
    };
    if let Err(e) = check_contained(&path) {
        warn!(line = block.line, submodule = label, error = %e, "unsafe submodule path, skipped");
        return;
    }
    if !seen.insert(path.clone()) {
        warn!(line = block.line, path = %path, "duplicate submodule path, keeping first");
        return;
    }

    let entry = SubmoduleEntry::new(path);
    entries.push(match block.url {
        Some(url) => entry.with_url(url),
        None => entry,
    });
}

/// Strips surrounding quotes, or a trailing comment from an unquoted value.
fn unquote(value: &str) -> String {
    if let Some(rest) = value.strip_prefix('"') {
        return rest.split('"').next().unwrap_or(rest).to_string();
    }
    value
        .split(['#', ';'])
        .next()
        .unwrap_or(value)
        .trim_end()
        .to_string()
}

/// Rejects a normalized path that would resolve outside the parent root.
///
/// # Errors
///
/// Returns `RegistryError::InvalidPath` for absolute paths (including drive
/// letters) and for paths with a `..` component.
pub fn check_contained(path: &str) -> Result<(), RegistryError> {
    let invalid = |reason| RegistryError::InvalidPath {
        path: path.to_string(),
        reason,
    };
    let bytes = path.as_bytes();
    if path.starts_with('/') || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':') {
        return Err(invalid("absolute"));
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err(invalid("outside the parent repository"));
    }
    Ok(())
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.trim_end_matches('/');
    path.strip_prefix("./").unwrap_or(path).to_string()
}
