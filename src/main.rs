//! hdrdoc: insert `@param` / `@return` doc comments into C++ headers.
//!
//! Scans class bodies for method declarations and writes generated
//! `/// @param NAME TYPE` and `/// @return TYPE` lines above them. Lines
//! generated by an earlier run are discarded first, so running twice gives
//! the same result as running once.
//!
//! - **stdin mode**: `hdrdoc < Foo.h > Foo.annotated.h`
//! - **file mode**: `hdrdoc -p AlignShop.pro 'PrimerDesign/*.h' widgets/SequenceTextView.h`
//!   rewrites each header in place and keeps the original as `Foo.h.old`.

use anyhow::{Context, Result};
use clap::Parser;
use hdrdoc::config::{self, FileConfig, Overrides, RunConfig};
use hdrdoc::rewrite::{self, FileReport, RewriteOptions};
use hdrdoc::{discover, project, transform};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(
    name = "hdrdoc",
    about = "Insert @param/@return doc comments above C++ header method declarations"
)]
struct Cli {
    /// Header files, directories or glob patterns. If none are given (and no
    /// project file is configured), reads stdin and writes stdout.
    headers: Vec<String>,

    /// qmake project file whose HEADERS list is processed as well
    #[arg(short = 'p', long)]
    project: Option<PathBuf>,

    /// Project root that relative headers and the project file resolve against
    #[arg(short = 'r', long)]
    root: Option<PathBuf>,

    /// TOML config file (default: ./hdrdoc.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Show what would change without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Overwrite headers without keeping a backup copy
    #[arg(long)]
    no_backup: bool,

    /// Suffix appended to the original file name for the backup copy
    #[arg(long)]
    backup_suffix: Option<String>,

    /// Log debug details to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.quiet);

    let config = load_config(cli)?;
    if config.is_stdin_mode() {
        return stdin_mode();
    }

    file_mode(&config)
}

/// stderr logging; `RUST_LOG` takes precedence over `-v` / `-q`.
fn configure_logging(verbose: bool, quiet: bool) {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();
}

fn load_config(cli: Cli) -> Result<RunConfig> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;

    let config_path = match cli.config {
        Some(path) => Some(path),
        None => Some(PathBuf::from(config::DEFAULT_CONFIG_NAME)).filter(|p| p.is_file()),
    };
    let file = match config_path {
        Some(ref path) => {
            info!(config = %path.display(), "loading config");
            Some((FileConfig::load(path)?, path.as_path()))
        }
        None => None,
    };

    let overrides = Overrides {
        root: cli.root,
        project_file: cli.project,
        headers: cli.headers,
        backup_suffix: cli.backup_suffix,
        no_backup: cli.no_backup,
        dry_run: cli.dry_run,
    };
    Ok(RunConfig::resolve(file, overrides, &cwd)?)
}

/// stdin mode: annotate stdin, write the result to stdout.
fn stdin_mode() -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let annotated = transform::annotate_source(&input);
    print!("{}", annotated.text);
    Ok(())
}

/// file mode: enumerate headers, rewrite each in place, print a summary.
fn file_mode(config: &RunConfig) -> Result<()> {
    let mut inputs = discover::expand_inputs(
        &config.header_globs,
        &config.project_root,
        &config.backup_suffix,
    )?;
    if let Some(ref pro) = config.project_file {
        inputs.extend(project::read_project(pro)?);
        inputs.sort();
        inputs.dedup();
    }

    if config.dry_run {
        println!("Mode: DRY RUN (no files will be modified)");
    }

    let options = RewriteOptions {
        dry_run: config.dry_run,
        backup: config.backup,
        backup_suffix: &config.backup_suffix,
    };

    let mut summary = Summary::default();
    for path in &inputs {
        println!("{}", display_path(path, &config.project_root));
        match rewrite::rewrite_file(path, &options) {
            Ok(report) => summary.record(&report),
            Err(e) => {
                error!("{:#}", e);
                summary.failed += 1;
            }
        }
    }

    summary.print(config.dry_run);
    if summary.failed > 0 {
        anyhow::bail!("{} file(s) could not be processed", summary.failed);
    }
    Ok(())
}

fn display_path<'a>(path: &'a Path, root: &Path) -> std::path::Display<'a> {
    path.strip_prefix(root).unwrap_or(path).display()
}

/// Totals across a file-mode run.
#[derive(Debug, Default)]
struct Summary {
    scanned: usize,
    modified: usize,
    failed: usize,
    stale_dropped: usize,
    annotations: usize,
}

impl Summary {
    fn record(&mut self, report: &FileReport) {
        let stats = &report.stats;
        debug!(
            file = %report.path.display(),
            lines_in = stats.lines_in,
            lines_out = stats.lines_out,
            declarations = stats.declarations_annotated,
            stale = stats.stale_dropped,
            "annotated"
        );
        self.scanned += 1;
        if report.changed {
            self.modified += 1;
        }
        self.stale_dropped += report.stats.stale_dropped;
        self.annotations += report.stats.annotations_written();
    }

    fn print(&self, dry_run: bool) {
        let modified = if dry_run { "Files to modify:" } else { "Files modified:" };
        println!();
        println!("Files scanned:        {}", self.scanned);
        println!("{:<22}{}", modified, self.modified);
        println!("Stale lines dropped:  {}", self.stale_dropped);
        println!("Annotations written:  {}", self.annotations);
        if self.failed > 0 {
            println!("Files failed:         {}", self.failed);
        }
    }
}
