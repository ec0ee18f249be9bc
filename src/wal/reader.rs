//! Log Reader
//!
//! Decodes records from the log one at a time.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use bytes::Buf;

use crate::error::{Result, StoreError};
use super::{compute_crc, LogRecord, HEADER_SIZE, MAX_RECORD_SIZE};

/// Reads records from a log
pub struct WalReader<R: Read> {
    reader: BufReader<R>,

    /// Offset just past the last record decoded successfully
    position: u64,
}

impl WalReader<File> {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> WalReader<R> {
    /// Read records from the reader's current position
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            position: 0,
        }
    }

    /// Offset just past the last good record, relative to where reading began
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read the next record from the log
    ///
    /// Returns `Ok(None)` at a clean end of stream (no bytes left at a
    /// record boundary). A record cut short yields [`StoreError::TornRecord`];
    /// a bad length, checksum or payload yields [`StoreError::LogCorruption`].
    pub fn next_record(&mut self) -> Result<Option<LogRecord>> {
        let offset = self.position;

        let mut header = [0u8; HEADER_SIZE];
        let read = read_up_to(&mut self.reader, &mut header)?;
        if read == 0 {
            return Ok(None);
        }
        if read < HEADER_SIZE {
            return Err(StoreError::TornRecord { offset });
        }

        let mut header = &header[..];
        let crc = header.get_u32_le();
        let len = header.get_u32_le();

        if len > MAX_RECORD_SIZE {
            return Err(StoreError::LogCorruption {
                offset,
                reason: format!("record length {} exceeds maximum {}", len, MAX_RECORD_SIZE),
            });
        }

        let mut payload = vec![0u8; len as usize];
        if read_up_to(&mut self.reader, &mut payload)? < payload.len() {
            return Err(StoreError::TornRecord { offset });
        }

        if compute_crc(&payload) != crc {
            return Err(StoreError::LogCorruption {
                offset,
                reason: "checksum mismatch".to_string(),
            });
        }

        let record = LogRecord::deserialize(&payload).map_err(|e| StoreError::LogCorruption {
            offset,
            reason: e.to_string(),
        })?;

        self.position = offset + (HEADER_SIZE + payload.len()) as u64;
        Ok(Some(record))
    }

    /// Iterate over records until end of stream or the first error
    pub fn records(self) -> WalIterator<R> {
        WalIterator {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over log records
///
/// Yields at most one error, after which it is exhausted.
pub struct WalIterator<R: Read> {
    reader: WalReader<R>,
    done: bool,
}

impl<R: Read> Iterator for WalIterator<R> {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the stream allows; returns the bytes read
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
