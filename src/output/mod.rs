//! Output formatters for duplicate scan results.
//!
//! - [`table`]: aligned text for terminals (default)
//! - [`json`]: one JSON document with groups, summary and errors
//! - [`csv`]: one row per file for spreadsheets
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::TableOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! print!("{}", TableOutput::new(&groups).render());
//! ```

pub mod csv;
pub mod json;
pub mod table;

use std::io::Write;

pub use self::csv::CsvOutput;
pub use json::JsonOutput;
pub use table::TableOutput;

use crate::cli::OutputFormat;
use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// Write results in the requested format.
///
/// # Errors
///
/// Returns an error if formatting or writing fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    groups: &[DuplicateGroup],
    summary: &ScanSummary,
    exit_code: ExitCode,
    with_summary: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            TableOutput::new(groups).write_to(writer)?;
            if with_summary {
                table::write_summary(writer, summary)?;
            }
        }
        OutputFormat::Json => JsonOutput::new(groups, summary, exit_code).write_to(writer, true)?,
        OutputFormat::Csv => CsvOutput::new(groups).write_to(&mut *writer)?,
    }
    writer.flush()?;
    Ok(())
}
