use keyline_types::RecordKey;

use crate::cursor::HistoryScan;
use crate::entry::HistoryEntry;
use crate::error::StoreResult;

/// Append-only versioned key-value ledger.
///
/// All implementations must satisfy these invariants:
/// - Entries are immutable once written. Every mutation appends a new
///   [`HistoryEntry`]; nothing is edited or removed, so replay is
///   deterministic and auditable.
/// - Sequence numbers per key start at 1 and increase by exactly 1 per
///   append, including across tombstones. They are never reused.
/// - Timestamps are assigned by the store at append time and are strictly
///   increasing within a key's history.
/// - The store never interprets values — it is byte-oriented and
///   encoding-agnostic. Existence policy belongs to the caller; `put` and
///   `delete` succeed unconditionally.
/// - All I/O errors are propagated, never silently ignored.
pub trait LedgerStore: Send + Sync {
    /// Returns `true` iff the latest entry for `key` exists and is not a
    /// tombstone. No side effects.
    fn exists(&self, key: &RecordKey) -> StoreResult<bool>;

    /// Append a non-tombstone entry with the given value. Unconditional.
    ///
    /// Returns the appended entry (with its assigned seq and timestamp).
    fn put(&self, key: &RecordKey, value: &[u8]) -> StoreResult<HistoryEntry>;

    /// Append a tombstone entry for `key`. Unconditional.
    fn delete(&self, key: &RecordKey) -> StoreResult<HistoryEntry>;

    /// The value of the latest non-tombstone entry, or `None` if the record
    /// is absent (tombstoned or never written).
    fn get_current(&self, key: &RecordKey) -> StoreResult<Option<Vec<u8>>>;

    /// Lazy, oldest-first scan of every entry ever written for `key`,
    /// tombstones included.
    ///
    /// Each call observes a consistent snapshot as of its start; entries
    /// appended after the scan begins are not visible to it. The scan is
    /// finite, restartable per call, and releases its resources on drop.
    fn history(&self, key: &RecordKey) -> StoreResult<HistoryScan>;

    /// Append a value only if the record is currently absent.
    ///
    /// The check and the append are a single atomic step; two concurrent
    /// calls on the same absent key cannot both succeed. Fails with
    /// [`StoreError::KeyPresent`] when the record is present.
    ///
    /// [`StoreError::KeyPresent`]: crate::error::StoreError::KeyPresent
    fn put_if_absent(&self, key: &RecordKey, value: &[u8]) -> StoreResult<HistoryEntry>;

    /// Append a value only if the record is currently present.
    ///
    /// Atomic like [`put_if_absent`](Self::put_if_absent). Fails with
    /// [`StoreError::KeyAbsent`] when the record is absent.
    ///
    /// [`StoreError::KeyAbsent`]: crate::error::StoreError::KeyAbsent
    fn put_if_present(&self, key: &RecordKey, value: &[u8]) -> StoreResult<HistoryEntry>;

    /// Append a tombstone only if the record is currently present.
    ///
    /// Atomic like [`put_if_absent`](Self::put_if_absent). Fails with
    /// [`StoreError::KeyAbsent`] when the record is absent, without
    /// appending a second tombstone.
    ///
    /// [`StoreError::KeyAbsent`]: crate::error::StoreError::KeyAbsent
    fn delete_if_present(&self, key: &RecordKey) -> StoreResult<HistoryEntry>;
}
