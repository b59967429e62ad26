use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use keyline_types::{RecordKey, Timestamp};

use crate::cursor::{HistoryScan, SnapshotCursor};
use crate::entry::{EntryBody, HistoryEntry};
use crate::error::{StoreError, StoreResult};
use crate::traits::LedgerStore;

/// In-memory, HashMap-based ledger store.
///
/// Intended for tests and embedding. Each key maps to its full entry list
/// behind a `RwLock`; conditional appends hold the write lock across the
/// check and the append, so they are atomic against concurrent callers.
/// History scans clone the key's entries under the read lock, giving every
/// scan a consistent snapshot as of its start.
pub struct InMemoryLedgerStore {
    histories: RwLock<HashMap<RecordKey, Vec<HistoryEntry>>>,
}

impl InMemoryLedgerStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            histories: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys with at least one history entry.
    pub fn key_count(&self) -> usize {
        self.histories.read().expect("lock poisoned").len()
    }

    /// Total entries across all keys, tombstones included.
    pub fn entry_count(&self) -> usize {
        self.histories
            .read()
            .expect("lock poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Returns `true` if no entry has ever been written.
    pub fn is_empty(&self) -> bool {
        self.histories.read().expect("lock poisoned").is_empty()
    }

    /// Remove all histories. Test/embedding convenience only; a durable
    /// backend has no equivalent.
    pub fn clear(&self) {
        self.histories.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all keys with history.
    pub fn keys(&self) -> Vec<RecordKey> {
        let map = self.histories.read().expect("lock poisoned");
        let mut keys: Vec<RecordKey> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn append(
        map: &mut HashMap<RecordKey, Vec<HistoryEntry>>,
        key: &RecordKey,
        body: EntryBody,
    ) -> HistoryEntry {
        let entries = map.entry(key.clone()).or_default();
        let seq = entries.len() as u64 + 1;
        // Strictly after the previous entry even within one millisecond.
        let timestamp = match entries.last() {
            Some(prev) => prev.timestamp.advance(),
            None => Timestamp::now(),
        };
        let entry = HistoryEntry {
            key: key.clone(),
            seq,
            timestamp,
            body,
        };
        entries.push(entry.clone());
        entry
    }

    fn is_live(entries: Option<&Vec<HistoryEntry>>) -> bool {
        entries
            .and_then(|e| e.last())
            .is_some_and(|last| !last.is_tombstone())
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn exists(&self, key: &RecordKey) -> StoreResult<bool> {
        let map = self.histories.read().expect("lock poisoned");
        Ok(Self::is_live(map.get(key)))
    }

    fn put(&self, key: &RecordKey, value: &[u8]) -> StoreResult<HistoryEntry> {
        let mut map = self.histories.write().expect("lock poisoned");
        let entry = Self::append(&mut map, key, EntryBody::Value(value.to_vec()));
        debug!(key = %key, seq = entry.seq, "appended value entry");
        Ok(entry)
    }

    fn delete(&self, key: &RecordKey) -> StoreResult<HistoryEntry> {
        let mut map = self.histories.write().expect("lock poisoned");
        let entry = Self::append(&mut map, key, EntryBody::Tombstone);
        debug!(key = %key, seq = entry.seq, "appended tombstone");
        Ok(entry)
    }

    fn get_current(&self, key: &RecordKey) -> StoreResult<Option<Vec<u8>>> {
        let map = self.histories.read().expect("lock poisoned");
        let current = map
            .get(key)
            .and_then(|entries| entries.last())
            .and_then(|last| last.value())
            .map(<[u8]>::to_vec);
        Ok(current)
    }

    fn history(&self, key: &RecordKey) -> StoreResult<HistoryScan> {
        let map = self.histories.read().expect("lock poisoned");
        let snapshot = map.get(key).cloned().unwrap_or_default();
        Ok(HistoryScan::new(Box::new(SnapshotCursor::new(snapshot))))
    }

    fn put_if_absent(&self, key: &RecordKey, value: &[u8]) -> StoreResult<HistoryEntry> {
        let mut map = self.histories.write().expect("lock poisoned");
        if Self::is_live(map.get(key)) {
            return Err(StoreError::KeyPresent(key.clone()));
        }
        let entry = Self::append(&mut map, key, EntryBody::Value(value.to_vec()));
        debug!(key = %key, seq = entry.seq, "appended value entry (if-absent)");
        Ok(entry)
    }

    fn put_if_present(&self, key: &RecordKey, value: &[u8]) -> StoreResult<HistoryEntry> {
        let mut map = self.histories.write().expect("lock poisoned");
        if !Self::is_live(map.get(key)) {
            return Err(StoreError::KeyAbsent(key.clone()));
        }
        let entry = Self::append(&mut map, key, EntryBody::Value(value.to_vec()));
        debug!(key = %key, seq = entry.seq, "appended value entry (if-present)");
        Ok(entry)
    }

    fn delete_if_present(&self, key: &RecordKey) -> StoreResult<HistoryEntry> {
        let mut map = self.histories.write().expect("lock poisoned");
        if !Self::is_live(map.get(key)) {
            return Err(StoreError::KeyAbsent(key.clone()));
        }
        let entry = Self::append(&mut map, key, EntryBody::Tombstone);
        debug!(key = %key, seq = entry.seq, "appended tombstone (if-present)");
        Ok(entry)
    }
}

impl std::fmt::Debug for InMemoryLedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLedgerStore")
            .field("key_count", &self.key_count())
            .field("entry_count", &self.entry_count())
            .finish()
    }
}
