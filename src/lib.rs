//! # urlstore
//!
//! A small key-value store mapping short generated keys to long values
//! (the backing store of a URL shortener), with:
//! - An in-memory table behind a reader/writer lock
//! - An append-only log for durability
//! - Crash recovery that keeps the valid prefix of a damaged log
//! - Collision-free key generation with a bounded retry
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Callers (HTTP handlers, CLI)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ get / put / count
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                                │
//! │            (Single Writer / Multi Reader)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────────────┐
//!          │            │                     │
//!          ▼            ▼                     ▼
//!   ┌─────────────┐ ┌─────────────┐   ┌──────────────┐
//!   │   KeyGen    │ │  MemTable   │   │  Append Log  │
//!   │  (index ->  │ │  (RwLock)   │   │ (replay on   │
//!   │    key)     │ │             │   │   startup)   │
//!   └─────────────┘ └─────────────┘   └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use urlstore::Store;
//!
//! let store = Store::open_path("store.db")?;
//! let key = store.put("http://example.com")?;
//! assert_eq!(store.get(&key).as_deref(), Some("http://example.com"));
//! # Ok::<(), urlstore::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wal;
pub mod memtable;
pub mod keygen;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{Config, SyncStrategy};
pub use keygen::{AlphabetKeyGen, KeyGenerator};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of urlstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
