//! Progress reporting utilities using indicatif.
//!
//! [`ProgressCallback`] is the hook the pipeline reports through;
//! [`Progress`] implements it with a discovery spinner and a comparison
//! progress bar drawn on stderr.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Phase name reported while walking roots.
pub const PHASE_DISCOVERY: &str = "discovery";
/// Phase name reported while hashing candidate buckets.
pub const PHASE_COMPARE: &str = "compare";

/// Progress callback for the duplicate finding phases.
///
/// Implementations must be thread-safe: discovery of several roots and the
/// comparison collector may report from different threads.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// * `phase` - [`PHASE_DISCOVERY`] or [`PHASE_COMPARE`]
    /// * `total` - Number of items to process, 0 if unknown
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// * `current` - Items processed so far (1-based)
    /// * `path` - Path most recently processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called with the number of bytes read for a completed item.
    fn on_item_completed(&self, _bytes: u64) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);

    /// Called to update the progress message.
    fn on_message(&self, _message: &str) {}
}

/// Terminal progress reporter.
pub struct Progress {
    multi: MultiProgress,
    discovery: Mutex<Option<ProgressBar>>,
    compare: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// If `quiet` is true nothing is drawn.
    ///
    /// ```
    /// use dupescan::progress::Progress;
    ///
    /// let progress = Progress::new(true);
    /// assert!(progress.is_quiet());
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let multi = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };
        Self {
            multi,
            discovery: Mutex::new(None),
            compare: Mutex::new(None),
            quiet,
        }
    }

    /// Whether this reporter suppresses all output.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn discovery_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn compare_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.green/blue}] {pos}/{len} buckets ({percent}%) {msg} (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    fn active_bar(&self) -> Option<ProgressBar> {
        let compare = self.compare.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = compare.as_ref() {
            return Some(pb.clone());
        }
        drop(compare);
        self.discovery
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        match phase {
            PHASE_DISCOVERY => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::discovery_style());
                pb.set_message("Discovering files");
                pb.enable_steady_tick(Duration::from_millis(100));
                *self
                    .discovery
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(pb);
            }
            PHASE_COMPARE => {
                let pb = self.multi.add(ProgressBar::new(total as u64));
                pb.set_style(Self::compare_style());
                pb.set_message("Comparing");
                *self.compare.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
            }
            other => log::debug!("Progress: ignoring unknown phase '{}'", other),
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        if self.quiet {
            return;
        }
        if let Some(pb) = self.active_bar() {
            pb.set_position(current as u64);
            pb.set_message(truncate_path(path, 30));
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }

        let slot = match phase {
            PHASE_DISCOVERY => &self.discovery,
            PHASE_COMPARE => &self.compare,
            _ => return,
        };
        if let Some(pb) = slot.lock().unwrap_or_else(PoisonError::into_inner).take() {
            pb.finish_and_clear();
        }
    }

    fn on_message(&self, message: &str) {
        if self.quiet {
            return;
        }
        if let Some(pb) = self.active_bar() {
            pb.set_message(message.to_string());
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name
            .chars()
            .skip(name_len.saturating_sub(max_len.saturating_sub(3)))
            .collect();
        return format!("...{}", tail);
    }

    format!(".../{}", file_name)
}
