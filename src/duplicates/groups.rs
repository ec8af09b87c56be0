//! Confirmed duplicate groups.
//!
//! A [`DuplicateGroup`] is the terminal output of the pipeline: two or more
//! files with identical size and identical BLAKE3 digest, listed in
//! discovery order. The first member is the group's representative.

use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::scanner::{hash_to_hex, FileEntry, Hash};

/// A file together with its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashedFile {
    /// The discovered file
    #[serde(flatten)]
    pub file: FileEntry,
    /// BLAKE3 digest of the full content
    #[serde(serialize_with = "serialize_hash")]
    pub hash: Hash,
}

impl HashedFile {
    /// Pair a file with its digest.
    #[must_use]
    pub fn new(file: FileEntry, hash: Hash) -> Self {
        Self { file, hash }
    }

    /// Digest as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }
}

fn serialize_hash<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hash_to_hex(hash))
}

/// Confirmed duplicate group of files.
///
/// Invariants: at least two members; every member has the group's size and
/// digest; members are in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// BLAKE3 hash of the shared content
    pub hash: Hash,
    /// File size in bytes (shared by all files)
    pub size: u64,
    /// Members in discovery order; the first is the representative
    pub files: Vec<HashedFile>,
}

impl DuplicateGroup {
    /// Build a group from members sharing one digest.
    ///
    /// Returns `None` if there are fewer than two members.
    #[must_use]
    pub fn from_members(files: Vec<HashedFile>) -> Option<Self> {
        if files.len() < 2 {
            return None;
        }
        let first = &files[0];
        let (hash, size) = (first.hash, first.file.size);
        debug_assert!(
            files.iter().all(|f| f.hash == hash && f.file.size == size),
            "duplicate group members must share size and digest"
        );
        Some(Self { hash, size, files })
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false for a constructed group; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The first-discovered member.
    #[must_use]
    pub fn representative(&self) -> &HashedFile {
        &self.files[0]
    }

    /// Number of redundant copies (all members minus the representative).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes that removing the redundant copies would free.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Member paths in discovery order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.file.path.clone()).collect()
    }
}
