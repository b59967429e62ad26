//! Append-only versioned key-value storage for Keyline.
//!
//! This crate implements the ledger store: a per-key, append-only history of
//! opaque values. Every mutation appends an immutable [`HistoryEntry`] with
//! the next sequence number and a store-assigned timestamp; deletion appends
//! a tombstone rather than removing anything.
//!
//! # Storage Backends
//!
//! All backends implement the [`LedgerStore`] trait:
//!
//! - [`InMemoryLedgerStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Entries are immutable once written; mutation appends, never edits.
//! 2. Sequence numbers per key start at 1 and are never reused or
//!    decremented, including across tombstones.
//! 3. The store never interprets values -- it is byte-oriented and
//!    encoding-agnostic. Existence policy lives in the registry layer.
//! 4. History scans observe a consistent snapshot as of their start and
//!    release cursor resources on drop, including on early exit.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod cursor;
pub mod entry;
pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use cursor::{HistoryCursor, HistoryScan, SnapshotCursor};
pub use entry::{EntryBody, HistoryEntry};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryLedgerStore;
pub use traits::LedgerStore;
