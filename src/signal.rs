//! Ctrl+C handling.
//!
//! A single [`ShutdownHandler`] wraps the `Arc<AtomicBool>` cancellation
//! flag shared by the walker, the dispatcher, every comparison worker and
//! the collector. Installing the handler hooks SIGINT (and SIGTERM/SIGHUP,
//! through the `termination` feature of `ctrlc`) to set that flag.
//!
//! ```rust,no_run
//! use dupescan::duplicates::FinderConfig;
//! use dupescan::signal::install_handler;
//!
//! let handler = install_handler().expect("signal handler");
//! let config = FinderConfig::default().with_shutdown_flag(handler.get_flag());
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Exit code for SIGINT: 128 + 2.
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request shutdown. Idempotent.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// The flag to hand to the finder and walker.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag so the handler can be reused for another run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static INSTALLED: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C handler.
///
/// The OS hook can only be registered once per process. Later calls return
/// the already-installed handler with its flag cleared, so several runs in
/// one process (as in tests) each start uncancelled.
///
/// # Errors
///
/// Returns [`SignalError::InstallFailed`] if the OS hook cannot be
/// registered and no handler was installed before.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = INSTALLED.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    let registered = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let mut stderr = std::io::stderr();
        let _ = writeln!(stderr, "\nInterrupted. Finishing in-flight work...");
        let _ = stderr.flush();
        log::info!("Shutdown signal received");
    });

    match registered {
        Ok(()) => Ok(INSTALLED.get_or_init(|| handler).clone()),
        // Another thread won the race to register
        Err(ctrlc::Error::MultipleHandlers) => match INSTALLED.get() {
            Some(existing) => {
                existing.reset();
                Ok(existing.clone())
            }
            None => {
                log::debug!("Ctrl+C handler registered elsewhere, using an unhooked flag");
                Ok(handler)
            }
        },
        Err(e) => Err(SignalError::InstallFailed(e)),
    }
}
