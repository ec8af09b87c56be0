//! Layered application configuration.
//!
//! Settings are merged with `figment`, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file: `--config PATH`, or `config.toml` in the platform config
//!    directory (e.g. `~/.config/dupescan/config.toml`)
//! 3. Environment variables prefixed with `DUPESCAN_` (e.g. `DUPESCAN_WORKERS=4`)
//! 4. Command-line flags, applied by [`Config::apply_cli`]
//!
//! ```toml
//! workers = 8
//! queue_capacity = 32
//! skip_hidden = true
//! min_size = 1024
//! ignore_patterns = ["*.tmp", "node_modules/"]
//! output = "json"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::FinderConfig;
use crate::scanner::WalkerConfig;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DUPESCAN_";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer could not be parsed or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// The size range is empty.
    #[error("min_size ({min}) is larger than max_size ({max})")]
    SizeRange {
        /// Configured minimum
        min: u64,
        /// Configured maximum
        max: u64,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comparison workers (0 = available parallelism)
    pub workers: usize,
    /// Work and result queue capacity (0 = twice the workers)
    pub queue_capacity: usize,
    /// Follow symbolic links during traversal
    pub follow_symlinks: bool,
    /// Skip hidden files and directories
    pub skip_hidden: bool,
    /// Smallest file size considered, in bytes
    pub min_size: Option<u64>,
    /// Largest file size considered, in bytes
    pub max_size: Option<u64>,
    /// Gitignore-style patterns to skip
    pub ignore_patterns: Vec<String>,
    /// Also skip what each root's `.gitignore` lists
    pub respect_gitignore: bool,
    /// Result format
    pub output: OutputFormat,
}

impl Config {
    /// Build the figment for defaults, an optional file, and the environment.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    /// Load configuration from `explicit`, or from the default location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `explicit` does not exist and
    /// [`ConfigError::Invalid`] if any layer fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(ref path) = file {
            log::debug!("Loading configuration from {}", path.display());
        }

        let config: Self = Self::figment(file.as_deref())
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but falls back to defaults with a warning.
    #[must_use]
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        match Self::load(explicit) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SizeRange`] if `min_size` exceeds `max_size`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.min_size, self.max_size) {
            (Some(min), Some(max)) if min > max => Err(ConfigError::SizeRange { min, max }),
            _ => Ok(()),
        }
    }

    /// Overlay command-line flags.
    ///
    /// Values given on the command line replace configured ones; switches
    /// can only turn a setting on; ignore patterns are appended.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(workers) = cli.workers {
            self.workers = workers;
        }
        if let Some(capacity) = cli.queue_capacity {
            self.queue_capacity = capacity;
        }
        if cli.min_size.is_some() {
            self.min_size = cli.min_size;
        }
        if cli.max_size.is_some() {
            self.max_size = cli.max_size;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        self.follow_symlinks |= cli.follow_symlinks;
        self.skip_hidden |= cli.skip_hidden;
        self.respect_gitignore |= cli.respect_gitignore;
        self.ignore_patterns
            .extend(cli.ignore_patterns.iter().cloned());
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(
            self.follow_symlinks,
            self.skip_hidden,
            self.min_size,
            self.max_size,
            self.ignore_patterns.clone(),
        )
        .with_gitignore(self.respect_gitignore)
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_workers(self.workers)
            .with_queue_capacity(self.queue_capacity)
            .with_walker_config(self.walker_config())
    }
}

/// Platform-specific location of `config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dupescan").map(|dirs| dirs.config_dir().join("config.toml"))
}
