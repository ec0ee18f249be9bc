//! MemTable Module
//!
//! In-memory view of every entry in the log.
//!
//! ## Responsibilities
//! - Fast lookups by key
//! - Single-writer/multi-reader access pattern
//! - Conditional insert (insert only if the key is absent)
//!
//! ## Data Structure Choice
//! A `HashMap` wrapped in a `parking_lot::RwLock`:
//! - Only point lookups are needed, so no ordering is kept
//! - Entries are never updated or removed, so the map only grows
//! - The map itself never leaves the lock; callers get owned copies

mod table;

pub use table::MemTable;
