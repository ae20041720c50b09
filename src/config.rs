//! Run configuration: command-line flags merged over an optional TOML file.
//!
//! ```toml
//! project_root = "."
//! project_file = "AlignShop.pro"
//! headers = ["PrimerDesign/*.h", "forms/PrimerDesign/*.h", "widgets/SequenceTextView.h"]
//! backup_suffix = ".old"
//! backup = true
//! ```
//!
//! Relative paths in the file resolve against the file's own directory;
//! header patterns and the project file then resolve against `project_root`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "hdrdoc.toml";

pub const DEFAULT_BACKUP_SUFFIX: &str = ".old";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("backup suffix must not be empty")]
    EmptySuffix,
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub project_root: Option<PathBuf>,
    pub project_file: Option<PathBuf>,
    pub headers: Vec<String>,
    pub backup_suffix: Option<String>,
    pub backup: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub project_file: Option<PathBuf>,
    pub headers: Vec<String>,
    pub backup_suffix: Option<String>,
    pub no_backup: bool,
    pub dry_run: bool,
}

/// Everything file mode needs to know, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub project_root: PathBuf,
    /// Files, directories or globs, relative to `project_root`.
    pub header_globs: Vec<String>,
    pub project_file: Option<PathBuf>,
    pub backup_suffix: String,
    pub backup: bool,
    pub dry_run: bool,
}

impl RunConfig {
    /// Merge `overrides` over an optional loaded file.
    ///
    /// `file` carries the parsed config and the path it was read from.
    pub fn resolve(
        file: Option<(FileConfig, &Path)>,
        overrides: Overrides,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let (file, config_dir) = match file {
            Some((file, path)) => {
                let dir = path
                    .parent()
                    .filter(|d| !d.as_os_str().is_empty())
                    .map_or_else(|| cwd.to_path_buf(), |d| cwd.join(d));
                (file, Some(dir))
            }
            None => (FileConfig::default(), None),
        };

        let project_root = match (overrides.root, file.project_root, config_dir) {
            (Some(root), _, _) => cwd.join(root),
            (None, Some(root), Some(dir)) => dir.join(root),
            (None, Some(root), None) => cwd.join(root),
            (None, None, Some(dir)) => dir,
            (None, None, None) => cwd.to_path_buf(),
        };

        let header_globs = if overrides.headers.is_empty() {
            file.headers
        } else {
            overrides.headers
        };

        let project_file = overrides
            .project_file
            .or(file.project_file)
            .map(|p| project_root.join(p));

        let backup_suffix = overrides
            .backup_suffix
            .or(file.backup_suffix)
            .unwrap_or_else(|| DEFAULT_BACKUP_SUFFIX.to_string());
        let backup = !overrides.no_backup && file.backup.unwrap_or(true);
        if backup && backup_suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }

        Ok(RunConfig {
            project_root,
            header_globs,
            project_file,
            backup_suffix,
            backup,
            dry_run: overrides.dry_run,
        })
    }

    /// Nothing to enumerate: filter stdin to stdout instead.
    pub fn is_stdin_mode(&self) -> bool {
        self.header_globs.is_empty() && self.project_file.is_none()
    }
}
