//! Per-bucket content comparison.
//!
//! [`compare_bucket`] hashes every member of one size bucket and partitions
//! the members by digest. Partitions with two or more members become
//! [`DuplicateGroup`]s. A member that fails to hash is reported and left
//! out; the rest of the bucket is still compared.
//!
//! Ordering is stable: groups appear in the order their first member was
//! discovered, and members keep discovery order inside a group.

use std::collections::HashMap;

use super::groups::{DuplicateGroup, HashedFile};
use super::index::SizeBucket;
use crate::scanner::{Hash, HashError, Hasher};

/// Result of comparing one bucket.
#[derive(Debug, Default)]
pub struct BucketOutcome {
    /// Size of the compared bucket
    pub size: u64,
    /// Confirmed duplicate groups, in first-discovered order
    pub groups: Vec<DuplicateGroup>,
    /// Members that could not be hashed
    pub errors: Vec<HashError>,
    /// Number of members hashed successfully
    pub hashed_files: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
}

/// Hash and partition one bucket of same-size files.
///
/// Buckets with fewer than two members are returned empty without any I/O.
#[must_use]
pub fn compare_bucket(bucket: &SizeBucket, hasher: &Hasher) -> BucketOutcome {
    let mut outcome = BucketOutcome {
        size: bucket.size,
        ..Default::default()
    };

    if !bucket.has_candidates() {
        return outcome;
    }

    log::trace!(
        "Comparing bucket of {} files, {} bytes each",
        bucket.len(),
        bucket.size
    );

    // Partitions in order of each digest's first appearance
    let mut partitions: Vec<Vec<HashedFile>> = Vec::new();
    let mut slot_by_hash: HashMap<Hash, usize> = HashMap::new();

    for file in &bucket.files {
        match hasher.full_hash(&file.path) {
            Ok(hash) => {
                log::trace!("Hashed {}", file.path.display());
                outcome.hashed_files += 1;
                outcome.bytes_hashed += file.size;

                let slot = *slot_by_hash.entry(hash).or_insert_with(|| {
                    partitions.push(Vec::new());
                    partitions.len() - 1
                });
                partitions[slot].push(HashedFile::new(file.clone(), hash));
            }
            Err(e) => {
                log::debug!("Failed to hash {}: {}", file.path.display(), e);
                outcome.errors.push(e);
            }
        }
    }

    outcome.groups = partitions
        .into_iter()
        .filter_map(DuplicateGroup::from_members)
        .collect();

    for group in &outcome.groups {
        log::debug!(
            "Duplicate group {}: {} files, {} bytes each",
            group.hash_hex(),
            group.len(),
            group.size
        );
    }

    outcome
}
