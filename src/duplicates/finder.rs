//! Duplicate finder: discovery plus the concurrent comparison pipeline.
//!
//! # Overview
//!
//! A scan runs in two stages:
//! 1. **Discovery** - every root is walked and each regular file is
//!    recorded in a shared [`DiscoveryContext`], bucketed by size.
//! 2. **Comparison** - buckets with two or more members are fed through a
//!    bounded work queue to a fixed pool of workers. Each worker hashes one
//!    whole bucket with [`compare_bucket`] and pushes the outcome onto a
//!    bounded results queue. The calling thread collects outcomes and emits
//!    every confirmed [`DuplicateGroup`] as soon as it arrives.
//!
//! Both queues are bounded, so at most `queue_capacity` buckets wait for a
//! worker and at most `queue_capacity` outcomes wait for the collector.
//!
//! # Cancellation
//!
//! Setting the shutdown flag stops the pipeline cooperatively: the
//! dispatcher stops submitting buckets, workers stop pulling new work and
//! drop any outcome they finish afterwards, and the collector stops
//! emitting groups while still draining the results queue so no worker is
//! left blocked. All threads are joined before [`DuplicateFinder::compare`]
//! returns.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_workers(4));
//! let (groups, summary) = finder
//!     .find_duplicates_in_paths(&[PathBuf::from(".")])
//!     .unwrap();
//!
//! println!("{} groups, {} reclaimable", groups.len(), summary.reclaimable_display());
//! ```

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use bytesize::ByteSize;
use crossbeam_channel::{bounded, Receiver, Sender};

use super::compare::{compare_bucket, BucketOutcome};
use super::groups::DuplicateGroup;
use super::index::{CandidateIndex, DiscoveryContext, GroupingStats, SizeBucket};
use crate::progress::{ProgressCallback, PHASE_COMPARE, PHASE_DISCOVERY};
use crate::scanner::{FileEntry, HashError, Hasher, ScanError, Walker, WalkerConfig};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Number of comparison workers. 0 uses the available parallelism.
    pub workers: usize,
    /// Capacity of the work and results queues. 0 uses twice the worker count.
    pub queue_capacity: usize,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("workers", &self.workers)
            .field("queue_capacity", &self.queue_capacity)
            .field("walker_config", &self.walker_config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl FinderConfig {
    /// Set the number of comparison workers (0 = automatic).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the queue capacity (0 = twice the worker count).
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Worker count after resolving the automatic setting. Always at least 1.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        }
    }

    /// Queue capacity after resolving the automatic setting. Always at least 1.
    #[must_use]
    pub fn effective_queue_capacity(&self) -> usize {
        if self.queue_capacity > 0 {
            self.queue_capacity
        } else {
            self.effective_workers() * 2
        }
    }

    fn is_shutdown_requested(&self) -> bool {
        is_cancelled(self.shutdown_flag.as_deref())
    }
}

fn is_cancelled(flag: Option<&AtomicBool>) -> bool {
    flag.is_some_and(|f| f.load(Ordering::SeqCst))
}

// ============================================================================
// Pipeline state
// ============================================================================

/// Lifecycle of one comparison run.
///
/// `Idle -> Running -> (Draining | Cancelled) -> Done`. No other
/// transitions are valid, and `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Created, nothing dispatched yet
    #[default]
    Idle,
    /// Buckets are being dispatched and compared
    Running,
    /// All work finished; remaining results are being flushed
    Draining,
    /// Shutdown was requested; remaining results are discarded
    Cancelled,
    /// Every thread has been joined
    Done,
}

impl PipelineState {
    /// Whether moving from `self` to `next` is a valid transition.
    #[must_use]
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Running)
                | (Running, Draining)
                | (Running, Cancelled)
                | (Draining, Done)
                | (Cancelled, Done)
        )
    }
}

/// Statistics and state history of one comparison run.
#[derive(Debug, Default)]
pub struct CompareReport {
    /// Candidate buckets in the index
    pub buckets_total: usize,
    /// Buckets whose outcome reached the collector
    pub buckets_compared: usize,
    /// Files hashed successfully
    pub hashed_files: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
    /// Groups handed to the caller
    pub groups_emitted: usize,
    /// Redundant copies across emitted groups
    pub duplicate_files: usize,
    /// Bytes reclaimable across emitted groups
    pub reclaimable_space: u64,
    /// Files that could not be hashed
    pub errors: Vec<HashError>,
    /// Whether the run was cancelled
    pub interrupted: bool,
    /// Every state the run passed through, in order
    pub states: Vec<PipelineState>,
}

impl CompareReport {
    fn new(buckets_total: usize) -> Self {
        Self {
            buckets_total,
            states: vec![PipelineState::Idle],
            ..Default::default()
        }
    }

    /// Current pipeline state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.states.last().copied().unwrap_or_default()
    }

    fn advance(&mut self, next: PipelineState) {
        let current = self.state();
        debug_assert!(
            current.can_transition_to(next),
            "invalid pipeline transition {:?} -> {:?}",
            current,
            next
        );
        if !current.can_transition_to(next) {
            log::error!("Ignoring invalid pipeline transition {:?} -> {:?}", current, next);
            return;
        }
        log::debug!("Pipeline: {:?} -> {:?}", current, next);
        self.states.push(next);
    }

    fn record(&mut self, outcome: BucketOutcome) -> Vec<DuplicateGroup> {
        self.buckets_compared += 1;
        self.hashed_files += outcome.hashed_files;
        self.bytes_hashed += outcome.bytes_hashed;
        self.errors.extend(outcome.errors);
        outcome.groups
    }
}

// ============================================================================
// Summary and errors
// ============================================================================

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Total number of files discovered
    pub total_files: usize,
    /// Total size of all discovered files in bytes
    pub total_size: u64,
    /// Files sharing their size with at least one other file
    pub candidate_files: usize,
    /// Size buckets with two or more members
    pub candidate_buckets: usize,
    /// Files eliminated because their size was unique
    pub eliminated_by_size: usize,
    /// Files hashed during comparison
    pub hashed_files: usize,
    /// Bytes read during comparison
    pub bytes_hashed: u64,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding representatives)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Whether the scan was interrupted
    pub interrupted: bool,
    /// Errors encountered during discovery and comparison
    pub errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Combine discovery statistics with a comparison report.
    #[must_use]
    pub fn new(
        stats: &GroupingStats,
        report: CompareReport,
        discovery_errors: Vec<ScanError>,
        scan_duration: Duration,
    ) -> Self {
        let mut errors = discovery_errors;
        errors.extend(report.errors.into_iter().map(ScanError::from));

        Self {
            total_files: stats.total_files,
            total_size: stats.total_size,
            candidate_files: stats.candidate_files,
            candidate_buckets: stats.candidate_buckets,
            eliminated_by_size: stats.eliminated_unique,
            hashed_files: report.hashed_files,
            bytes_hashed: report.bytes_hashed,
            duplicate_groups: report.groups_emitted,
            duplicate_files: report.duplicate_files,
            reclaimable_space: report.reclaimable_space,
            scan_duration,
            interrupted: report.interrupted,
            errors,
        }
    }

    /// Percentage of the scanned bytes taken up by redundant copies.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize(self.reclaimable_space).to_string()
    }

    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize(self.total_size).to_string()
    }

    /// Whether any file or root could not be processed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// No paths were given.
    #[error("No paths to scan")]
    NoPaths,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Discovery finished without finding a single file.
    #[error("Cannot find any file to compare")]
    NoFiles(Vec<ScanError>),

    /// A pipeline thread could not be started.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pipeline thread panicked.
    #[error("Pipeline thread '{0}' panicked")]
    ThreadPanicked(&'static str),
}

/// Roots after canonicalization, ready to walk.
#[derive(Debug, Default)]
pub struct ResolvedRoots {
    /// Canonical roots to scan, in argument order
    pub roots: Vec<PathBuf>,
    /// Roots skipped because they lie inside another root: `(skipped, outer)`
    pub nested: Vec<(PathBuf, PathBuf)>,
    /// Roots that could not be resolved
    pub errors: Vec<ScanError>,
}

/// Result of walking every root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Files bucketed by size
    pub index: CandidateIndex,
    /// Canonical roots that were scanned
    pub roots: Vec<PathBuf>,
    /// Roots that could not be resolved and entries that could not be read
    pub errors: Vec<ScanError>,
}

// ============================================================================
// DuplicateFinder
// ============================================================================

/// Duplicate finder that runs discovery and the comparison pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The configuration this finder was built with.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Canonicalize `paths`, dropping repeats and roots nested in another root.
    ///
    /// Roots that do not exist are returned as [`ScanError::NotFound`].
    #[must_use]
    pub fn resolve_roots(&self, paths: &[PathBuf]) -> ResolvedRoots {
        resolve_roots(paths)
    }

    /// Walk every root and bucket the discovered files by size.
    ///
    /// Roots are canonicalized; repeated roots and roots nested inside
    /// another root are scanned once. A root that does not exist is
    /// recorded as a [`ScanError::NotFound`] and the remaining roots are
    /// still scanned. A root that is a regular file is indexed directly.
    pub fn discover(&self, paths: &[PathBuf]) -> Discovery {
        self.discover_resolved(self.resolve_roots(paths))
    }

    /// Walk already resolved roots one after another, in order.
    ///
    /// Members of one bucket keep discovery order: roots in the order
    /// given, each root in name-sorted walk order.
    pub fn discover_resolved(&self, resolved: ResolvedRoots) -> Discovery {
        let ResolvedRoots {
            roots, mut errors, ..
        } = resolved;

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_DISCOVERY, 0);
        }

        let context = DiscoveryContext::new();
        for root in &roots {
            if self.config.is_shutdown_requested() {
                break;
            }
            errors.extend(self.discover_root(root, &context));
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_DISCOVERY);
        }

        let index = context.finish();
        log::debug!(
            "Discovered {} files in {} root(s), {} error(s)",
            index.len(),
            roots.len(),
            errors.len()
        );

        Discovery {
            index,
            roots,
            errors,
        }
    }

    fn discover_root(&self, root: &Path, context: &DiscoveryContext) -> Vec<ScanError> {
        let metadata = match std::fs::metadata(root) {
            Ok(m) => m,
            Err(e) => {
                log::debug!("Cannot read root {}: {}", root.display(), e);
                return vec![ScanError::from_io(root.to_path_buf(), e)];
            }
        };

        if metadata.is_file() {
            let size = metadata.len();
            if self.config.walker_config.accepts_size(size) {
                context.insert(FileEntry::new(root.to_path_buf(), size));
            }
            return Vec::new();
        }

        log::debug!("Walking {}", root.display());

        let mut walker = Walker::new(root, self.config.walker_config.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }

        let mut errors = Vec::new();
        for result in walker.walk() {
            match result {
                Ok(file) => {
                    let path = file.path.to_string_lossy().into_owned();
                    let scanned = context.insert(file);
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_progress(scanned, &path);
                    }
                }
                Err(e) => errors.push(e),
            }
        }
        errors
    }

    /// Compare every candidate bucket and hand each confirmed group to `emit`.
    ///
    /// Groups are emitted on the calling thread in completion order. Within
    /// a group, members keep discovery order. When the shutdown flag is set,
    /// no further group is emitted, every thread is joined and the report
    /// is marked interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if a pipeline thread cannot be spawned or panics.
    pub fn compare<F>(
        &self,
        index: &CandidateIndex,
        mut emit: F,
    ) -> Result<CompareReport, FinderError>
    where
        F: FnMut(DuplicateGroup),
    {
        let stats = index.stats();
        let workers = self.config.effective_workers();
        let capacity = self.config.effective_queue_capacity();
        let shutdown = self.config.shutdown_flag.as_deref();
        let hasher = &self.hasher;
        let callback = self.config.progress_callback.as_deref();

        let mut report = CompareReport::new(stats.candidate_buckets);

        log::info!(
            "Comparing {} candidate files in {} buckets ({} workers, queue capacity {})",
            stats.candidate_files,
            stats.candidate_buckets,
            workers,
            capacity
        );
        if let Some(cb) = callback {
            cb.on_phase_start(PHASE_COMPARE, stats.candidate_buckets);
        }

        report.advance(PipelineState::Running);

        let joined = thread::scope(|scope| -> Result<(usize, usize), FinderError> {
            // Both queues live inside the scope so an early return drops
            // them before the scope joins, which unblocks every thread.
            let (work_tx, work_rx) = bounded::<SizeBucket>(capacity);
            let (result_tx, result_rx) = bounded::<BucketOutcome>(capacity);

            let dispatcher = thread::Builder::new()
                .name("dupescan-dispatch".into())
                .spawn_scoped(scope, move || dispatch(index, &work_tx, shutdown))?;

            let mut handles = Vec::with_capacity(workers);
            for id in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let handle = thread::Builder::new()
                    .name(format!("dupescan-worker-{id}"))
                    .spawn_scoped(scope, move || {
                        run_worker(id, &work_rx, &result_tx, hasher, shutdown)
                    })?;
                handles.push(handle);
            }
            drop(work_rx);
            drop(result_tx);

            // Drains until every worker has dropped its sender
            for outcome in result_rx.iter() {
                if report.interrupted || is_cancelled(shutdown) {
                    report.interrupted = true;
                    continue;
                }

                let size = outcome.size;
                let bytes = outcome.bytes_hashed;
                for group in report.record(outcome) {
                    if is_cancelled(shutdown) {
                        report.interrupted = true;
                        break;
                    }
                    report.groups_emitted += 1;
                    report.duplicate_files += group.duplicate_count();
                    report.reclaimable_space += group.wasted_space();
                    emit(group);
                }

                if let Some(cb) = callback {
                    cb.on_item_completed(bytes);
                    cb.on_progress(report.buckets_compared, &format!("{size} byte files"));
                }
            }

            let dispatched = dispatcher
                .join()
                .map_err(|_| FinderError::ThreadPanicked("dispatcher"))?;
            let mut compared = 0;
            for handle in handles {
                compared += handle
                    .join()
                    .map_err(|_| FinderError::ThreadPanicked("worker"))?;
            }
            Ok((dispatched, compared))
        });

        if let Some(cb) = callback {
            cb.on_phase_end(PHASE_COMPARE);
        }

        let (dispatched, compared) = joined?;

        if report.interrupted || is_cancelled(shutdown) {
            report.interrupted = true;
            report.advance(PipelineState::Cancelled);
            log::warn!(
                "Comparison cancelled after {} of {} buckets ({} dispatched, {} compared)",
                report.buckets_compared,
                report.buckets_total,
                dispatched,
                compared
            );
        } else {
            report.advance(PipelineState::Draining);
            log::info!(
                "Comparison complete: {} groups from {} buckets, {} hashed",
                report.groups_emitted,
                report.buckets_compared,
                ByteSize(report.bytes_hashed)
            );
        }
        report.advance(PipelineState::Done);

        Ok(report)
    }

    /// Find all duplicate files under a single root.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist
    /// - No file is found under it
    /// - The scan is interrupted by shutdown signal
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        self.find_duplicates_in_paths(&[path.to_path_buf()])
    }

    /// Find duplicate files across several roots.
    ///
    /// Missing roots and unreadable entries are collected in
    /// [`ScanSummary::errors`]; the scan continues with everything else.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if no paths are given, no file is found, or
    /// the scan is interrupted.
    pub fn find_duplicates_in_paths(
        &self,
        paths: &[PathBuf],
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();

        if paths.is_empty() {
            return Err(FinderError::NoPaths);
        }
        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let discovery = self.discover(paths);

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }
        if discovery.index.is_empty() {
            return Err(FinderError::NoFiles(discovery.errors));
        }

        let mut groups = Vec::new();
        let report = self.compare(&discovery.index, |group| groups.push(group))?;
        if report.interrupted {
            return Err(FinderError::Interrupted);
        }

        let summary = ScanSummary::new(
            &discovery.index.stats(),
            report,
            discovery.errors,
            start_time.elapsed(),
        );
        log::info!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok((groups, summary))
    }

    /// Find duplicates among an already collected list of files.
    ///
    /// # Errors
    ///
    /// Returns `FinderError::Interrupted` if the scan is interrupted.
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<FileEntry>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let index: CandidateIndex = files.into_iter().collect();

        let mut groups = Vec::new();
        let report = self.compare(&index, |group| groups.push(group))?;
        if report.interrupted {
            return Err(FinderError::Interrupted);
        }

        let summary = ScanSummary::new(&index.stats(), report, Vec::new(), start_time.elapsed());
        Ok((groups, summary))
    }
}

/// Feed candidate buckets into the work queue in ascending size order.
///
/// Dropping the sender on return closes the queue.
fn dispatch(
    index: &CandidateIndex,
    work_tx: &Sender<SizeBucket>,
    shutdown: Option<&AtomicBool>,
) -> usize {
    let mut dispatched = 0;
    for bucket in index.buckets_with_multiple_members() {
        if is_cancelled(shutdown) {
            log::debug!("Dispatcher stopping after {} buckets", dispatched);
            break;
        }
        if work_tx.send(bucket).is_err() {
            break;
        }
        dispatched += 1;
    }
    dispatched
}

fn run_worker(
    id: usize,
    work_rx: &Receiver<SizeBucket>,
    result_tx: &Sender<BucketOutcome>,
    hasher: &Hasher,
    shutdown: Option<&AtomicBool>,
) -> usize {
    let mut compared = 0;
    loop {
        if is_cancelled(shutdown) {
            break;
        }
        let Ok(bucket) = work_rx.recv() else {
            break;
        };

        let outcome = compare_bucket(&bucket, hasher);
        compared += 1;

        // Work finished after cancellation is dropped, never published
        if is_cancelled(shutdown) || result_tx.send(outcome).is_err() {
            break;
        }
    }
    log::trace!("Worker {} exiting after {} buckets", id, compared);
    compared
}

/// Canonicalize roots, dropping repeats and roots nested in another root.
fn resolve_roots(paths: &[PathBuf]) -> ResolvedRoots {
    let mut canonical = Vec::new();
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for path in paths {
        match std::fs::canonicalize(path) {
            Ok(resolved) => {
                if seen.insert(resolved.clone()) {
                    canonical.push(resolved);
                } else {
                    log::debug!("Skipping repeated root {}", path.display());
                }
            }
            Err(e) => {
                log::debug!("Cannot scan {}: {}", path.display(), e);
                errors.push(ScanError::from_io(path.clone(), e));
            }
        }
    }

    let mut roots = Vec::with_capacity(canonical.len());
    let mut nested = Vec::new();
    for root in &canonical {
        let outer = canonical
            .iter()
            .find(|other| *other != root && other.is_dir() && root.starts_with(other));
        match outer {
            Some(outer) => {
                log::info!(
                    "Skipping {}: scanned as part of {}",
                    root.display(),
                    outer.display()
                );
                nested.push((root.clone(), outer.clone()));
            }
            None => roots.push(root.clone()),
        }
    }

    ResolvedRoots {
        roots,
        nested,
        errors,
    }
}
