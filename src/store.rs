//! Store Module
//!
//! The key-value store that ties the table, the log and key generation
//! together.
//!
//! ## Responsibilities
//! - Open the log and rebuild the table from it on startup
//! - Serve concurrent lookups from memory
//! - Conditionally insert and append each new entry to the log
//! - Generate fresh keys for `put`, with a bounded retry on collision

use std::fmt;
use std::fs;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::keygen::{AlphabetKeyGen, KeyGenerator};
use crate::memtable::MemTable;
use crate::wal::{open_log_file, LogFile, LogRecord, RecoveryResult, WalRecovery, WalWriter};

/// The key-value store
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader
///
/// - **Reads** (`get`, `count`): shared lock on the table only. Readers
///   never wait on file I/O.
/// - **Writes** (`set`, `put`): serialized by the `wal` mutex, held across
///   the conditional insert and the append, so log order is insert order.
///   The table's write lock is held only for the check-and-insert.
///
/// Share it between threads as `Arc<Store>`.
pub struct Store {
    /// Store configuration
    config: Config,

    /// In-memory entries (internal RwLock)
    table: MemTable,

    /// Append log; its mutex also serializes writers
    wal: Mutex<WalWriter>,

    /// Maps an index to a candidate key
    keygen: Box<dyn KeyGenerator>,

    /// Next index handed to the key generator; starts at the recovered count
    next_index: AtomicU64,

    /// Outcome of the replay done at open
    recovery: RecoveryResult,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create missing parent directories of the log
    /// 2. Open the log for reading and appending (fatal on failure)
    /// 3. Replay the log into memory (damage is logged, not fatal)
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.log_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.log_path)?;
        Ok(Self::with_log_file(config, file))
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified log file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().log_path(path.as_ref()).build())
    }

    /// Build a store over an already-open log handle
    ///
    /// The handle is replayed from offset 0, then used for every append.
    /// `config.log_path` is only used for log messages here.
    pub fn with_log_file<F: LogFile + 'static>(config: Config, mut file: F) -> Self {
        let table = MemTable::new();

        let recovery = match Self::load(&mut file, &table) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Error loading log {}: {}", config.log_path.display(), e);
                RecoveryResult {
                    entries_recovered: table.len() as u64,
                    was_truncated: true,
                    ..RecoveryResult::default()
                }
            }
        };

        if recovery.was_truncated {
            tracing::warn!(
                "Log {} is damaged past byte {}; new records are appended after the damage \
                 and will not be replayed on the next start",
                config.log_path.display(),
                recovery.valid_bytes
            );
        }
        tracing::info!(
            "Opened {}: {} entries recovered, {} corrupted, {} duplicates skipped",
            config.log_path.display(),
            recovery.entries_recovered,
            recovery.entries_corrupted,
            recovery.duplicates_skipped
        );

        if let Err(e) = file.seek(SeekFrom::End(0)) {
            tracing::error!("Error seeking to end of log {}: {}", config.log_path.display(), e);
        }

        Self {
            wal: Mutex::new(WalWriter::new(file, config.sync_strategy)),
            next_index: AtomicU64::new(table.len() as u64),
            table,
            keygen: Box::new(AlphabetKeyGen::base62()),
            recovery,
            config,
        }
    }

    /// Replace the key generator
    pub fn with_key_generator(mut self, keygen: impl KeyGenerator + 'static) -> Self {
        self.keygen = Box::new(keygen);
        self
    }

    fn load<F: LogFile>(file: &mut F, table: &MemTable) -> Result<RecoveryResult> {
        file.seek(SeekFrom::Start(0))?;
        WalRecovery::replay(&mut *file, |record| table.insert(record.key, record.value))
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<String> {
        self.table.get(key)
    }

    /// Insert a key-value pair if the key is absent
    ///
    /// Returns `false` without touching anything when the key exists.
    /// On insert the record is appended to the log; a failed append is
    /// logged and the entry stays visible in memory, but it will not
    /// survive a restart.
    pub fn set(&self, key: &str, value: &str) -> bool {
        let mut wal = self.wal.lock();

        if !self.table.insert(key.to_string(), value.to_string()) {
            return false;
        }

        if let Err(e) = wal.append(&LogRecord::new(key, value)) {
            tracing::error!(
                "Error saving key {} to {}: {}; entry is held in memory only",
                key,
                self.config.log_path.display(),
                e
            );
        }

        true
    }

    /// Number of entries in the store
    pub fn count(&self) -> usize {
        self.table.len()
    }

    /// Store a value under a freshly generated key
    ///
    /// Every attempt takes a fresh index from a counter seeded with the
    /// entry count at open, so concurrent puts never race for the same
    /// candidate. Collisions only come from keys inserted through [`set`]
    /// or by another generator. Gives up with [`StoreError::KeysExhausted`]
    /// after `max_put_attempts` collisions.
    ///
    /// [`set`]: Store::set
    pub fn put(&self, value: &str) -> Result<String> {
        let attempts = self.config.max_put_attempts.max(1);

        for attempt in 0..attempts {
            let index = self.next_index.fetch_add(1, Ordering::Relaxed);
            let key = self.keygen.generate(index);

            if self.set(&key, value) {
                return Ok(key);
            }
            tracing::debug!(attempt, index, key = %key, "Key collision, trying next index");
        }

        Err(StoreError::KeysExhausted { attempts })
    }

    /// Force appended records to stable storage
    pub fn sync(&self) -> Result<()> {
        self.wal.lock().sync()
    }

    /// Close the store gracefully
    ///
    /// Syncs the log; the file is closed when the store is dropped.
    pub fn close(self) -> Result<()> {
        self.sync()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Outcome of the replay done at open
    pub fn recovery(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// Get the log file path
    pub fn log_path(&self) -> &Path {
        &self.config.log_path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .field("count", &self.count())
            .field("recovery", &self.recovery)
            .finish_non_exhaustive()
    }
}
