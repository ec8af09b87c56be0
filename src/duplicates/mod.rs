//! Duplicate detection.
//!
//! - [`index`]: size buckets built during discovery
//! - [`compare`]: hashing and partitioning of one bucket
//! - [`groups`]: confirmed duplicate groups
//! - [`finder`]: discovery plus the concurrent comparison pipeline

pub mod compare;
pub mod finder;
pub mod groups;
pub mod index;

pub use compare::{compare_bucket, BucketOutcome};
pub use finder::{
    CompareReport, Discovery, DuplicateFinder, FinderConfig, FinderError, PipelineState,
    ResolvedRoots, ScanSummary,
};
pub use groups::{DuplicateGroup, HashedFile};
pub use index::{CandidateIndex, DiscoveryContext, GroupingStats, SizeBucket};
