//! CSV output formatter for duplicate scan results.
//!
//! One row per member of every duplicate group.
//!
//! # Columns
//!
//! - `group_id`: 1-based group number, in emission order
//! - `hash`: BLAKE3 content hash (hexadecimal)
//! - `size`: File size in bytes
//! - `path`: Path of the file
//! - `representative`: `true` for the first-discovered member of the group

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateGroup;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output was not valid UTF-8.
    #[error("CSV output is not valid UTF-8")]
    Utf8,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    hash: &'a str,
    size: u64,
    path: String,
    representative: bool,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write the CSV output, header included, to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.groups.is_empty() {
            csv_writer.write_record(["group_id", "hash", "size", "path", "representative"])?;
        }

        for (idx, group) in self.groups.iter().enumerate() {
            let hash = group.hash_hex();
            for (member_idx, member) in group.files.iter().enumerate() {
                csv_writer.serialize(CsvRow {
                    group_id: idx + 1,
                    hash: &hash,
                    size: group.size,
                    path: member.file.path.to_string_lossy().into_owned(),
                    representative: member_idx == 0,
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|_| CsvOutputError::Utf8)
    }
}
