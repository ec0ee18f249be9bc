//! Error types for urlstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for urlstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    /// A record was cut short at the end of the log (crash mid-append)
    #[error("Torn record at offset {offset}")]
    TornRecord { offset: u64 },

    /// A complete record failed its checksum, size or decode check
    #[error("Log corruption at offset {offset}: {reason}")]
    LogCorruption { offset: u64, reason: String },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Key Generation Errors
    // -------------------------------------------------------------------------
    #[error("No free key found after {attempts} attempts")]
    KeysExhausted { attempts: u32 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
