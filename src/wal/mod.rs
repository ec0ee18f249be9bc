//! Append Log Module
//!
//! Provides durability through an append-only log of inserts.
//!
//! ## Responsibilities
//! - Append one record per successful insert
//! - CRC32 checksums for corruption detection
//! - Replay on startup, stopping at the first torn or corrupt record
//!
//! ## File Format
//! No file header or footer, only records in insert order.
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Record 1                                │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ CRC (4) │ Len (4) │ Payload (Len)   │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Record 2                                │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ CRC (4) │ Len (4) │ Payload (Len)   │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//! Integers are little-endian. The payload is the bincode encoding of a
//! [`LogRecord`] (two length-prefixed UTF-8 strings) and the CRC covers the
//! payload only.

mod entry;
mod file;
mod writer;
mod reader;
mod recovery;

pub use entry::{compute_crc, LogRecord, HEADER_SIZE, MAX_RECORD_SIZE};
pub use file::{open_log_file, LogFile};
pub use writer::WalWriter;
pub use reader::{WalIterator, WalReader};
pub use recovery::{RecoveryResult, WalRecovery};
