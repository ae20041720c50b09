//! Header discovery: expand files, directories and glob patterns.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extensions treated as C++ headers when scanning a directory.
const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx"];

/// Expand patterns into a sorted, deduplicated list of header files.
///
/// Relative patterns are resolved against `root`. A directory is scanned
/// (non-recursive) for header extensions. Anything else is a glob. Files
/// ending in `backup_suffix` are never returned.
pub fn expand_inputs(patterns: &[String], root: &Path, backup_suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = root.join(pattern);
        if path.is_file() {
            files.push(path);
            continue;
        }
        if path.is_dir() {
            scan_directory(&path, &mut files)?;
            continue;
        }

        let rooted = rooted_glob(root, pattern);
        let matches: Vec<_> = glob::glob(&rooted)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        debug!(pattern = %pattern, count = matches.len(), "expanded glob");
        files.extend(matches);
    }

    files.retain(|p| !is_backup(p, backup_suffix));
    files.sort();
    files.dedup();
    Ok(files)
}

fn scan_directory(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let p = entry.path();
        if p.is_file() && is_header(&p) {
            files.push(p);
        }
    }
    Ok(())
}

fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext))
}

fn is_backup(path: &Path, backup_suffix: &str) -> bool {
    !backup_suffix.is_empty() && path.to_string_lossy().ends_with(backup_suffix)
}

/// Prefix a relative glob with the escaped root so metacharacters in the
/// root path itself are matched literally.
fn rooted_glob(root: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }
    let root = glob::Pattern::escape(&root.to_string_lossy());
    format!("{}/{}", root.trim_end_matches('/'), pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn plain_file_relative_to_root() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.h");
        let files = expand_inputs(&["a.h".to_string()], dir.path(), ".old").unwrap();
        assert_eq!(files, vec![a]);
    }

    #[test]
    fn directory_scan_picks_headers_only() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "inc/a.h");
        let b = touch(dir.path(), "inc/b.hpp");
        touch(dir.path(), "inc/a.cpp");
        touch(dir.path(), "inc/a.h.old");
        touch(dir.path(), "inc/deeper/c.h");
        let files = expand_inputs(&["inc".to_string()], dir.path(), ".old").unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn glob_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "src/b.h");
        let a = touch(dir.path(), "src/a.h");
        let patterns = vec!["src/*.h".to_string(), "src/a.h".to_string()];
        let files = expand_inputs(&patterns, dir.path(), ".old").unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn glob_skips_backups() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.h");
        touch(dir.path(), "a.h.old");
        let files = expand_inputs(&["*.h*".to_string()], dir.path(), ".old").unwrap();
        assert_eq!(files, vec![a]);
    }

    #[test]
    fn unmatched_glob_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = expand_inputs(&["nothing/*.h".to_string()], dir.path(), ".old").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn invalid_glob_is_error() {
        let dir = TempDir::new().unwrap();
        let err = expand_inputs(&["[".to_string()], dir.path(), ".old").unwrap_err();
        assert!(err.to_string().contains("invalid glob pattern"));
    }
}
