//! Plain-text table of duplicate groups.
//!
//! Three columns, `SIZE`, `HASH` and `PATH`. Size and hash are printed on
//! the first row of each group only; the remaining members of the group
//! leave those cells blank, which marks where the next group starts.
//!
//! ```text
//!  SIZE | HASH                                                             | PATH
//! ------+------------------------------------------------------------------+------------
//!  5 B  | ea8f163db38682925e4491c5e58d4bb3506ef8c14eb78a86e908c5624a67200f | /tmp/a.txt
//!       |                                                                  | /tmp/b.txt
//! ```

use std::io::{self, Write};

use bytesize::ByteSize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::duplicates::{DuplicateGroup, ScanSummary};

#[derive(Debug, Clone, Tabled)]
struct GroupRow {
    #[tabled(rename = "SIZE")]
    size: String,
    #[tabled(rename = "HASH")]
    hash: String,
    #[tabled(rename = "PATH")]
    path: String,
}

/// Table output formatter.
pub struct TableOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> TableOutput<'a> {
    /// Create a table over the given groups.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    fn rows(&self) -> Vec<GroupRow> {
        let mut rows = Vec::new();
        for group in self.groups {
            let size = ByteSize(group.size).to_string();
            let hash = group.hash_hex();
            for (member_idx, member) in group.files.iter().enumerate() {
                let (size, hash) = if member_idx == 0 {
                    (size.clone(), hash.clone())
                } else {
                    (String::new(), String::new())
                };
                rows.push(GroupRow {
                    size,
                    hash,
                    path: member.file.path.display().to_string(),
                });
            }
        }
        rows
    }

    /// Write the table. Nothing is written when there are no groups.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.groups.is_empty() {
            return Ok(());
        }

        let table = Table::new(self.rows()).with(Style::psql()).to_string();
        writeln!(writer, "{table}")
    }

    /// Render the table to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Write the closing summary lines shown after a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary<W: Write>(writer: &mut W, summary: &ScanSummary) -> io::Result<()> {
    if summary.duplicate_groups == 0 {
        writeln!(
            writer,
            "No duplicates among {} files ({}).",
            summary.total_files,
            summary.total_size_display()
        )?;
    } else {
        writeln!(writer)?;
        writeln!(
            writer,
            "{} duplicate groups, {} redundant files, {} reclaimable ({:.1}% of {} scanned) in {:.2?}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display(),
            summary.wasted_percentage(),
            summary.total_size_display(),
            summary.scan_duration
        )?;
    }
    if summary.interrupted {
        writeln!(writer, "Scan was interrupted; results are incomplete.")?;
    }
    Ok(())
}
