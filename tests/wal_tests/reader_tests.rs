//! Tests for the log reader
//!
//! These tests verify:
//! - Reading from empty and well-formed logs
//! - Position tracking
//! - Torn record detection (partial header / partial payload)
//! - Corruption detection (checksum, oversized length)
//! - Iterator behaviour around errors

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use tempfile::TempDir;
use urlstore::wal::{LogRecord, WalReader, HEADER_SIZE, MAX_RECORD_SIZE};
use urlstore::StoreError;

// =============================================================================
// Helper Functions
// =============================================================================

fn frames(records: &[LogRecord]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for record in records {
        bytes.extend_from_slice(&record.serialize().unwrap());
    }
    bytes
}

fn sample_records() -> Vec<LogRecord> {
    vec![
        LogRecord::new("a", "http://example.com"),
        LogRecord::new("b", "http://other.com"),
        LogRecord::new("c", "http://example.com"),
    ]
}

// =============================================================================
// Basic Reading Tests
// =============================================================================

#[test]
fn test_read_empty_log() {
    let mut reader = WalReader::new(Cursor::new(Vec::new()));

    assert!(reader.next_record().unwrap().is_none());
    assert_eq!(reader.position(), 0);
}

#[test]
fn test_read_records_in_order() {
    let records = sample_records();
    let mut reader = WalReader::new(Cursor::new(frames(&records)));

    for expected in &records {
        assert_eq!(reader.next_record().unwrap().as_ref(), Some(expected));
    }
    assert!(reader.next_record().unwrap().is_none());
}

#[test]
fn test_position_tracks_record_boundaries() {
    let records = sample_records();
    let bytes = frames(&records);
    let first_len = records[0].serialize().unwrap().len() as u64;

    let mut reader = WalReader::new(Cursor::new(bytes.clone()));

    reader.next_record().unwrap();
    assert_eq!(reader.position(), first_len);

    while reader.next_record().unwrap().is_some() {}
    assert_eq!(reader.position(), bytes.len() as u64);
}

#[test]
fn test_open_reads_file() {
    let temp = TempDir::new().unwrap();
    let path: PathBuf = temp.path().join("test.log");
    let mut file = File::create(&path).unwrap();
    file.write_all(&frames(&sample_records())).unwrap();
    file.sync_all().unwrap();

    let records: Vec<LogRecord> = WalReader::open(&path)
        .unwrap()
        .records()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(records, sample_records());
}

#[test]
fn test_open_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let result = WalReader::open(&temp.path().join("missing.log"));

    assert!(matches!(result, Err(StoreError::Io(_))));
}

// =============================================================================
// Torn Record Tests
// =============================================================================

#[test]
fn test_partial_header_is_torn() {
    let good = LogRecord::new("a", "1").serialize().unwrap();
    let mut bytes = good.clone();
    bytes.extend_from_slice(&[0x01, 0x02, 0x03]);

    let mut reader = WalReader::new(Cursor::new(bytes));
    assert!(reader.next_record().unwrap().is_some());

    match reader.next_record() {
        Err(StoreError::TornRecord { offset }) => assert_eq!(offset, good.len() as u64),
        other => panic!("expected torn record, got {:?}", other),
    }
    assert_eq!(reader.position(), good.len() as u64);
}

#[test]
fn test_partial_payload_is_torn() {
    let mut bytes = LogRecord::new("a", "http://example.com").serialize().unwrap();
    bytes.truncate(HEADER_SIZE + 4);

    let mut reader = WalReader::new(Cursor::new(bytes));

    assert!(matches!(
        reader.next_record(),
        Err(StoreError::TornRecord { offset: 0 })
    ));
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_checksum_mismatch_is_corruption() {
    let mut bytes = LogRecord::new("a", "http://example.com").serialize().unwrap();
    if let Some(byte) = bytes.last_mut() {
        *byte ^= 0xFF;
    }

    let mut reader = WalReader::new(Cursor::new(bytes));

    match reader.next_record() {
        Err(StoreError::LogCorruption { offset, reason }) => {
            assert_eq!(offset, 0);
            assert!(reason.contains("checksum"));
        }
        other => panic!("expected corruption, got {:?}", other),
    }
}

#[test]
fn test_oversized_length_is_corruption() {
    let mut bytes = vec![0u8; 4];
    bytes.extend_from_slice(&(MAX_RECORD_SIZE + 1).to_le_bytes());

    let mut reader = WalReader::new(Cursor::new(bytes));

    match reader.next_record() {
        Err(StoreError::LogCorruption { reason, .. }) => assert!(reason.contains("exceeds")),
        other => panic!("expected corruption, got {:?}", other),
    }
}

#[test]
fn test_zeroed_header_is_corruption() {
    // An empty payload has CRC 0, so the checksum passes and decoding fails
    let mut reader = WalReader::new(Cursor::new(vec![0u8; HEADER_SIZE]));

    assert!(matches!(
        reader.next_record(),
        Err(StoreError::LogCorruption { offset: 0, .. })
    ));
}

// =============================================================================
// Iterator Tests
// =============================================================================

#[test]
fn test_iterator_stops_after_first_error() {
    let mut bytes = frames(&sample_records()[..1]);
    bytes.extend_from_slice(&[0xAB; 5]);
    bytes.extend_from_slice(&frames(&sample_records()[1..]));

    let mut iter = WalReader::new(Cursor::new(bytes)).records();

    assert!(matches!(iter.next(), Some(Ok(_))));
    assert!(matches!(iter.next(), Some(Err(_))));
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_iterator_on_clean_log_has_no_errors() {
    let results: Vec<_> = WalReader::new(Cursor::new(frames(&sample_records())))
        .records()
        .collect();

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.is_ok()));
}
