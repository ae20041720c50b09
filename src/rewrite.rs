//! Rewrite one header in place, keeping the original as a backup.

use crate::transform::{self, TransformStats};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a changed file is written back.
#[derive(Debug, Clone)]
pub struct RewriteOptions<'a> {
    /// Report only, touch nothing.
    pub dry_run: bool,
    /// Rename the original to `<path><backup_suffix>` before writing.
    pub backup: bool,
    pub backup_suffix: &'a str,
}

/// Outcome for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: TransformStats,
    pub changed: bool,
    /// Where the original went, if it was moved.
    pub backup: Option<PathBuf>,
}

/// `<path><suffix>`, e.g. `Foo.h` -> `Foo.h.old`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Annotate `path` and write the result back if anything changed.
pub fn rewrite_file(path: &Path, options: &RewriteOptions) -> Result<FileReport> {
    let original =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let annotated = transform::annotate_source(&original);
    let changed = annotated.text != original;

    let mut report = FileReport {
        path: path.to_path_buf(),
        stats: annotated.stats,
        changed,
        backup: None,
    };
    if !changed || options.dry_run {
        debug!(file = %path.display(), changed, dry_run = options.dry_run, "not writing");
        return Ok(report);
    }

    if options.backup {
        let backup = backup_path(path, options.backup_suffix);
        if backup.exists() {
            fs::remove_file(&backup)
                .with_context(|| format!("failed to remove stale backup {}", backup.display()))?;
        }
        fs::rename(path, &backup).with_context(|| {
            format!("failed to move {} to {}", path.display(), backup.display())
        })?;
        report.backup = Some(backup);
    }

    fs::write(path, &annotated.text).with_context(|| match &report.backup {
        Some(backup) => format!(
            "failed to write {} (original kept at {})",
            path.display(),
            backup.display()
        ),
        None => format!("failed to write {}", path.display()),
    })?;
    debug!(file = %path.display(), annotations = report.stats.annotations_written(), "rewrote");
    Ok(report)
}
