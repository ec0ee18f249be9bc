//! Key Generation Tests
//!
//! Tests verify:
//! - Base-62 encoding of indices
//! - Distinct indices give distinct keys
//! - Custom alphabet validation
//! - Closures as generators

use std::collections::HashSet;

use urlstore::keygen::{AlphabetKeyGen, KeyGenerator, BASE62_ALPHABET};
use urlstore::StoreError;

// =============================================================================
// Base-62 Tests
// =============================================================================

#[test]
fn test_base62_single_digits() {
    let keygen = AlphabetKeyGen::base62();

    assert_eq!(keygen.generate(0), "a");
    assert_eq!(keygen.generate(25), "z");
    assert_eq!(keygen.generate(26), "A");
    assert_eq!(keygen.generate(51), "Z");
    assert_eq!(keygen.generate(52), "0");
    assert_eq!(keygen.generate(61), "9");
}

#[test]
fn test_base62_multiple_digits() {
    let keygen = AlphabetKeyGen::base62();

    assert_eq!(keygen.generate(62), "ba");
    assert_eq!(keygen.generate(63), "bb");
    assert_eq!(keygen.generate(62 * 62 - 1), "99");
    assert_eq!(keygen.generate(62 * 62), "baa");
}

#[test]
fn test_base62_max_index() {
    let key = AlphabetKeyGen::base62().generate(u64::MAX);

    assert_eq!(key.len(), 11);
    assert!(key.bytes().all(|b| BASE62_ALPHABET.contains(&b)));
}

#[test]
fn test_distinct_indices_give_distinct_keys() {
    let keygen = AlphabetKeyGen::default();

    let keys: HashSet<String> = (0..20_000).map(|i| keygen.generate(i)).collect();

    assert_eq!(keys.len(), 20_000);
}

#[test]
fn test_generation_is_pure() {
    let keygen = AlphabetKeyGen::base62();
    assert_eq!(keygen.generate(123_456), keygen.generate(123_456));
}

// =============================================================================
// Custom Alphabet Tests
// =============================================================================

#[test]
fn test_binary_alphabet() {
    let keygen = AlphabetKeyGen::new(b"01").unwrap();

    assert_eq!(keygen.radix(), 2);
    assert_eq!(keygen.generate(0), "0");
    assert_eq!(keygen.generate(5), "101");
}

#[test]
fn test_alphabet_too_short() {
    assert!(matches!(AlphabetKeyGen::new(b""), Err(StoreError::Config(_))));
    assert!(matches!(AlphabetKeyGen::new(b"x"), Err(StoreError::Config(_))));
}

#[test]
fn test_alphabet_with_repeated_symbol() {
    assert!(matches!(AlphabetKeyGen::new(b"abca"), Err(StoreError::Config(_))));
}

#[test]
fn test_alphabet_with_unprintable_bytes() {
    assert!(matches!(AlphabetKeyGen::new(b"ab c"), Err(StoreError::Config(_))));
    assert!(matches!(AlphabetKeyGen::new(&[b'a', 0xFF]), Err(StoreError::Config(_))));
}

// =============================================================================
// Closure Generator Tests
// =============================================================================

#[test]
fn test_closure_is_a_generator() {
    fn boxed(keygen: impl KeyGenerator + 'static) -> Box<dyn KeyGenerator> {
        Box::new(keygen)
    }

    let keygen = boxed(|i: u64| format!("id-{}", i));
    assert_eq!(keygen.generate(7), "id-7");
}
