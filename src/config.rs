//! Configuration for urlstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the append-only log file. Created on open if absent,
    /// together with any missing parent directories.
    pub log_path: PathBuf,

    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: how often to fsync the log
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Key Generation Configuration
    // -------------------------------------------------------------------------
    /// Upper bound on candidate keys tried by a single `put`
    pub max_put_attempts: u32,
}

/// Log sync strategy
///
/// Every append is written to the OS immediately; the strategy only decides
/// when the data is forced to stable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every write (safest, slowest)
    EveryWrite,

    /// fsync after N unsynced entries (balanced durability/performance)
    EveryNEntries { count: usize },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("./store.db"),
            sync_strategy: SyncStrategy::EveryNEntries { count: 100 },
            max_put_attempts: 64,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the log sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the maximum number of candidate keys a `put` may try.
    /// Values below 1 are raised to 1.
    pub fn max_put_attempts(mut self, attempts: u32) -> Self {
        self.config.max_put_attempts = attempts.max(1);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
