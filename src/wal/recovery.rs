//! Log Recovery
//!
//! Rebuilds state after a restart by replaying the log.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, StoreError};
use super::{LogRecord, WalReader};

/// Handles log replay after a restart or crash
pub struct WalRecovery;

/// Result of a recovery operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of records decoded successfully
    pub entries_recovered: u64,

    /// Number of complete but corrupted records hit (replay stops at the first)
    pub entries_corrupted: u64,

    /// Decoded records whose key was already present
    pub duplicates_skipped: u64,

    /// Offset just past the last valid record
    pub valid_bytes: u64,

    /// Whether bytes remain past `valid_bytes` (torn or corrupt tail)
    pub was_truncated: bool,
}

impl WalRecovery {
    /// Replay every valid record from `reader` into `apply`
    ///
    /// `apply` returns `false` when the record's key was already known; such
    /// records are counted in `duplicates_skipped`. A torn or corrupt record
    /// ends the replay and is reported in the result rather than as an error.
    /// Records applied before an I/O error stay applied.
    pub fn replay<R, F>(reader: R, mut apply: F) -> Result<RecoveryResult>
    where
        R: Read,
        F: FnMut(LogRecord) -> bool,
    {
        let mut reader = WalReader::new(reader);
        let mut result = RecoveryResult::default();

        loop {
            match reader.next_record() {
                Ok(Some(record)) => {
                    result.entries_recovered += 1;
                    if !apply(record) {
                        result.duplicates_skipped += 1;
                    }
                }
                Ok(None) => break,
                Err(StoreError::TornRecord { offset }) => {
                    tracing::warn!(offset, "Torn record at end of log, ignoring tail");
                    result.was_truncated = true;
                    break;
                }
                Err(StoreError::LogCorruption { offset, reason }) => {
                    tracing::warn!(offset, %reason, "Corrupted log record, stopping replay");
                    result.entries_corrupted += 1;
                    result.was_truncated = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        result.valid_bytes = reader.position();
        Ok(result)
    }

    /// Recover records from a log file
    ///
    /// Returns every valid record in log order together with the stats.
    pub fn recover(path: &Path) -> Result<(Vec<LogRecord>, RecoveryResult)> {
        let mut records = Vec::new();
        let result = Self::replay(File::open(path)?, |record| {
            records.push(record);
            true
        })?;
        Ok((records, result))
    }

    /// Verify integrity of a log file without modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        Self::replay(File::open(path)?, |_| true)
    }
}
