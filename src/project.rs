//! qmake project file reader: the `HEADERS` list of a `.pro` file.
//!
//! ```text
//! HEADERS += widgets/SequenceTextView.h \
//!     PrimerDesign/PrimerDesignWizard.h \
//!     $$PWD/forms/PrimerDesign/PrimerDesignInput.h
//! ```
//!
//! Only the first `HEADERS` assignment is read, including its `\`
//! continuation lines.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static RE_HEADERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:space:]]*HEADERS[[:space:]]*\+?=(.*)$").unwrap());

/// Read a `.pro` file and return its headers, resolved against the
/// directory containing it.
pub fn read_project(path: &Path) -> Result<Vec<PathBuf>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read project file {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let headers = parse_headers(&text, base_dir);
    debug!(project = %path.display(), count = headers.len(), "read project headers");
    Ok(headers)
}

/// Extract header paths from project file text.
pub fn parse_headers(pro: &str, base_dir: &Path) -> Vec<PathBuf> {
    let mut headers = Vec::new();
    let mut lines = pro.lines();

    let mut continued = false;
    for line in lines.by_ref() {
        if let Some(caps) = RE_HEADERS.captures(line) {
            continued = collect_entries(&caps[1], base_dir, &mut headers);
            break;
        }
    }

    while continued {
        match lines.next() {
            Some(line) => continued = collect_entries(line, base_dir, &mut headers),
            None => break,
        }
    }

    headers
}

/// Push the headers named in one segment; true when it ends with `\`.
fn collect_entries(segment: &str, base_dir: &Path, headers: &mut Vec<PathBuf>) -> bool {
    let segment = segment.trim_end();
    let (body, continued) = match segment.strip_suffix('\\') {
        Some(body) => (body, true),
        None => (segment, false),
    };

    for token in body.split_whitespace() {
        if !token.ends_with(".h") {
            continue;
        }
        let token = token.strip_prefix("$$PWD/").unwrap_or(token);
        headers.push(base_dir.join(token));
    }
    continued
}
