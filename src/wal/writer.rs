//! Log Writer
//!
//! Handles appending records to the log file.

use std::fmt;
use std::path::Path;

use crate::config::SyncStrategy;
use crate::error::Result;
use super::{open_log_file, LogFile, LogRecord};

/// Appends records to the log file
pub struct WalWriter {
    file: Box<dyn LogFile>,
    sync_strategy: SyncStrategy,

    /// Records written since the last fsync
    unsynced: usize,

    /// Records appended through this writer
    records_written: u64,
}

impl WalWriter {
    /// Open or create a log file for appending
    pub fn open(path: &Path, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = open_log_file(path)?;
        Ok(Self::new(file, sync_strategy))
    }

    /// Wrap an already-open handle. Writes go wherever the handle's
    /// cursor points, so it should be in append mode or positioned at the end.
    pub fn new(file: impl LogFile + 'static, sync_strategy: SyncStrategy) -> Self {
        Self {
            file: Box::new(file),
            sync_strategy,
            unsynced: 0,
            records_written: 0,
        }
    }

    /// Append a record to the log, returning the number of bytes written
    ///
    /// The frame is handed to the OS before returning. Whether it is also
    /// fsynced depends on the sync strategy.
    pub fn append(&mut self, record: &LogRecord) -> Result<u64> {
        let frame = record.serialize()?;

        self.file.write_all(&frame)?;
        self.file.flush()?;

        self.records_written += 1;
        self.unsynced += 1;

        let sync_due = match self.sync_strategy {
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNEntries { count } => self.unsynced >= count.max(1),
        };
        if sync_due {
            self.sync()?;
        }

        Ok(frame.len() as u64)
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        if self.unsynced == 0 {
            return Ok(());
        }
        self.file.sync()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Records appended through this writer
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Records written but not yet fsynced
    pub fn unsynced(&self) -> usize {
        self.unsynced
    }
}

impl fmt::Debug for WalWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalWriter")
            .field("sync_strategy", &self.sync_strategy)
            .field("unsynced", &self.unsynced)
            .field("records_written", &self.records_written)
            .finish()
    }
}

impl Drop for WalWriter {
    fn drop(&mut self) {
        if let Err(e) = self.sync() {
            tracing::warn!("Failed to sync log on close: {}", e);
        }
    }
}
