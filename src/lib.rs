//! dupescan - concurrent duplicate file finder
//!
//! Walks one or more roots, buckets files by size, and confirms duplicates
//! by hashing same-size files with BLAKE3 on a bounded worker pool.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use bytesize::ByteSize;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderError, ResolvedRoots, ScanSummary};
use crate::error::ExitCode;
use crate::progress::Progress;

/// Run a scan as described by the command line.
///
/// Results go to stdout; status lines, warnings and progress go to stderr.
///
/// # Errors
///
/// Returns an error when no path is given, no file is found under any
/// root, discovery is interrupted, or the pipeline itself fails. Files and
/// roots that cannot be read are reported as warnings instead.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.paths.is_empty() {
        return Err(anyhow::Error::new(FinderError::NoPaths)
            .context("Usage: dupescan [OPTIONS] <PATH>..."));
    }

    let mut config = Config::load_or_default(cli.config.as_deref());
    config.apply_cli(&cli);
    config.validate().context("Invalid size filter")?;
    log::debug!("Effective configuration: {:?}", config);

    let shutdown = signal::install_handler()?;
    let show_progress = !cli.quiet && !cli.no_progress && io::stderr().is_terminal();

    let mut finder_config = config
        .finder_config()
        .with_shutdown_flag(shutdown.get_flag());
    if show_progress {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }
    let finder = DuplicateFinder::new(finder_config);
    let start_time = Instant::now();

    let resolved = finder.resolve_roots(&cli.paths);
    if !cli.quiet {
        for line in root_announcements(&resolved) {
            eprintln!("{}", line);
        }
    }

    let discovery = finder.discover_resolved(resolved);
    for e in &discovery.errors {
        eprintln!("warning: {}", e);
    }

    if shutdown.is_shutdown_requested() {
        return Err(FinderError::Interrupted.into());
    }
    if discovery.index.is_empty() {
        return Err(FinderError::NoFiles(discovery.errors).into());
    }

    let stats = discovery.index.stats();
    if !cli.quiet {
        eprintln!(
            "Found {} files ({}), {} share a size with another file",
            stats.total_files,
            ByteSize(stats.total_size),
            stats.candidate_files
        );
    }

    let mut groups = Vec::new();
    let report = finder.compare(&discovery.index, |group| groups.push(group))?;
    for e in &report.errors {
        eprintln!("warning: {}", e);
    }

    let summary = ScanSummary::new(&stats, report, discovery.errors, start_time.elapsed());
    let exit_code = exit_code_for(&summary);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_results(
        &mut out,
        config.output,
        &groups,
        &summary,
        exit_code,
        !cli.quiet,
    )?;

    Ok(exit_code)
}

/// "Checking" lines for directory roots, then a note per skipped nested root.
fn root_announcements(resolved: &ResolvedRoots) -> Vec<String> {
    let checking = resolved
        .roots
        .iter()
        .filter(|root| root.is_dir())
        .map(|root| format!("Checking {}", root.display()));
    let nested = resolved.nested.iter().map(|(root, outer)| {
        format!(
            "note: {} is inside {} and is scanned as part of it",
            root.display(),
            outer.display()
        )
    });
    checking.chain(nested).collect()
}

fn exit_code_for(summary: &ScanSummary) -> ExitCode {
    if summary.interrupted {
        ExitCode::Interrupted
    } else if summary.has_errors() {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    }
}
