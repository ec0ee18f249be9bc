//! Log record definitions
//!
//! Defines a single record and its on-disk framing.

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Header size: 4 bytes CRC + 4 bytes payload length
pub const HEADER_SIZE: usize = 8;

/// Maximum payload size (16 MB). Larger lengths are read as corruption.
pub const MAX_RECORD_SIZE: u32 = 16 * 1024 * 1024;

/// A single insert recorded in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Generated short key
    pub key: String,

    /// Stored value (typically a long URL)
    pub value: String,
}

impl LogRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Serialize into a complete frame: CRC (4) + Len (4) + payload
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let payload =
            bincode::serialize(self).map_err(|e| StoreError::Serialization(e.to_string()))?;

        if payload.len() > MAX_RECORD_SIZE as usize {
            return Err(StoreError::Serialization(format!(
                "Record too large: {} bytes (max {})",
                payload.len(),
                MAX_RECORD_SIZE
            )));
        }

        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        frame.put_u32_le(compute_crc(&payload));
        frame.put_u32_le(payload.len() as u32);
        frame.put_slice(&payload);

        Ok(frame)
    }

    /// Deserialize a record from a frame's payload (header already stripped)
    pub fn deserialize(payload: &[u8]) -> Result<Self> {
        bincode::deserialize(payload).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// CRC32 of a record payload
pub fn compute_crc(payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(payload);
    hasher.finalize()
}
