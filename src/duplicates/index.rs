//! Size-keyed candidate index.
//!
//! # Overview
//!
//! Files with different sizes cannot be duplicates, so every discovered
//! file is first bucketed by its exact size. Only buckets with two or more
//! members are ever handed to the comparison stage; in typical trees that
//! skips the large majority of files without reading a single byte.
//!
//! [`CandidateIndex`] is a plain single-owner structure. When discovery
//! runs on several threads, they share a [`DiscoveryContext`], which owns
//! the index and the scanned-file counter behind one mutex held only for
//! the duration of an insert.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::CandidateIndex;
//! use dupescan::scanner::FileEntry;
//! use std::path::PathBuf;
//!
//! let mut index = CandidateIndex::new();
//! index.insert(FileEntry::new(PathBuf::from("/a.txt"), 100));
//! index.insert(FileEntry::new(PathBuf::from("/b.txt"), 100));
//! index.insert(FileEntry::new(PathBuf::from("/c.txt"), 200));
//!
//! let buckets: Vec<_> = index.buckets_with_multiple_members().collect();
//! assert_eq!(buckets.len(), 1);
//! assert_eq!(buckets[0].size, 100);
//! ```

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::scanner::FileEntry;

/// Files sharing one exact size, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBucket {
    /// File size in bytes (shared by all files in this bucket)
    pub size: u64,
    /// Files with this exact size
    pub files: Vec<FileEntry>,
}

impl SizeBucket {
    /// Create an empty bucket for `size`.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            files: Vec::new(),
        }
    }

    /// Create a bucket with initial files.
    #[must_use]
    pub fn with_files(size: u64, files: Vec<FileEntry>) -> Self {
        Self { size, files }
    }

    /// Number of files in this bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether this bucket can contain duplicates (2+ files).
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        self.files.len() > 1
    }

    /// Total bytes that would be read to compare this bucket.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.size * self.files.len() as u64
    }
}

/// Statistics describing how well size bucketing pruned the candidate set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files indexed
    pub total_files: usize,
    /// Total size of all indexed files in bytes
    pub total_size: u64,
    /// Number of distinct file sizes
    pub unique_sizes: usize,
    /// Files that still need hashing (members of buckets with 2+ files)
    pub candidate_files: usize,
    /// Number of buckets with 2+ files
    pub candidate_buckets: usize,
    /// Files eliminated without hashing (singleton buckets)
    pub eliminated_unique: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size alone.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Mapping from file size to the files of that size, in discovery order.
///
/// Not internally synchronized; see [`DiscoveryContext`] for shared use.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    buckets: BTreeMap<u64, Vec<FileEntry>>,
    total_files: usize,
}

impl CandidateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file to the bucket for its size, creating the bucket if absent.
    pub fn insert(&mut self, file: FileEntry) {
        self.total_files += 1;
        self.buckets.entry(file.size).or_default().push(file);
    }

    /// Total number of indexed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total_files
    }

    /// Check if no files have been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Number of distinct sizes seen.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Files of a given size, in discovery order.
    #[must_use]
    pub fn bucket(&self, size: u64) -> Option<&[FileEntry]> {
        self.buckets.get(&size).map(Vec::as_slice)
    }

    /// Lazily iterate over buckets that can contain duplicates.
    ///
    /// Buckets are yielded in ascending size order. Singleton buckets are
    /// skipped and never cloned.
    pub fn buckets_with_multiple_members(&self) -> impl Iterator<Item = SizeBucket> + '_ {
        self.buckets
            .iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(&size, files)| SizeBucket::with_files(size, files.clone()))
    }

    /// Consume the index, yielding owned candidate buckets.
    pub fn into_candidate_buckets(self) -> impl Iterator<Item = SizeBucket> {
        self.buckets
            .into_iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(size, files)| SizeBucket::with_files(size, files))
    }

    /// Compute pruning statistics.
    #[must_use]
    pub fn stats(&self) -> GroupingStats {
        let mut stats = GroupingStats {
            total_files: self.total_files,
            unique_sizes: self.buckets.len(),
            ..Default::default()
        };

        for (&size, files) in &self.buckets {
            stats.total_size += size * files.len() as u64;
            if files.len() > 1 {
                stats.candidate_files += files.len();
                stats.candidate_buckets += 1;
            } else {
                stats.eliminated_unique += 1;
            }
        }

        stats
    }
}

impl FromIterator<FileEntry> for CandidateIndex {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut index = Self::new();
        for file in iter {
            index.insert(file);
        }
        index
    }
}

impl Extend<FileEntry> for CandidateIndex {
    fn extend<I: IntoIterator<Item = FileEntry>>(&mut self, iter: I) {
        for file in iter {
            self.insert(file);
        }
    }
}

/// Shared discovery state for one scan.
///
/// Owns the [`CandidateIndex`] and the scanned-file counter. Discovery
/// threads call [`DiscoveryContext::insert`]; the lock is held only for the
/// insert itself. Once discovery has finished, [`DiscoveryContext::finish`]
/// hands back the index, which is read-only from then on.
#[derive(Debug, Default)]
pub struct DiscoveryContext {
    inner: Mutex<CandidateIndex>,
}

impl DiscoveryContext {
    /// Create an empty discovery context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a discovered file and return the number scanned so far.
    pub fn insert(&self, file: FileEntry) -> usize {
        // A panic while holding the lock cannot leave a half-inserted entry,
        // so a poisoned index is still consistent.
        let mut index = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        index.insert(file);
        index.len()
    }

    /// Number of files discovered so far.
    #[must_use]
    pub fn scanned(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// End discovery and take ownership of the finished index.
    #[must_use]
    pub fn finish(self) -> CandidateIndex {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
