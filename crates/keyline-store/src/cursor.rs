//! Lazy history scanning.
//!
//! A [`HistoryScan`] is a finite, oldest-first pass over every entry ever
//! written for one key. Each scan observes a consistent snapshot as of its
//! start: entries appended after the scan begins are not visible to it.
//! Whatever the cursor holds (locks, file handles, snapshot buffers) is
//! released when the scan is dropped, so a consumer may stop early without
//! leaking anything.

use crate::entry::HistoryEntry;
use crate::error::StoreResult;

/// Backend-provided cursor over one key's history.
///
/// Implementations yield entries oldest-first and return `Ok(None)` when the
/// history is exhausted. An `Err` ends the scan; callers must not call
/// `next_entry` again after an error.
pub trait HistoryCursor: Send {
    fn next_entry(&mut self) -> StoreResult<Option<HistoryEntry>>;
}

/// A scan over one key's history, consumed as an iterator.
///
/// Fuses after exhaustion or the first error. Dropping the scan releases the
/// underlying cursor's resources.
pub struct HistoryScan {
    cursor: Box<dyn HistoryCursor>,
    done: bool,
}

impl HistoryScan {
    /// Wrap a backend cursor.
    pub fn new(cursor: Box<dyn HistoryCursor>) -> Self {
        Self {
            cursor,
            done: false,
        }
    }

    /// Drain the scan into a vector, stopping at the first error.
    pub fn collect_entries(self) -> StoreResult<Vec<HistoryEntry>> {
        self.collect()
    }
}

impl Iterator for HistoryScan {
    type Item = StoreResult<HistoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
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

impl std::fmt::Debug for HistoryScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryScan").field("done", &self.done).finish()
    }
}

/// Cursor over an owned snapshot of a key's entries.
///
/// Used by backends that materialize a consistent snapshot up front (the
/// in-memory store clones the key's entry list under a read lock). The
/// snapshot is freed when the cursor drops.
pub struct SnapshotCursor {
    entries: std::vec::IntoIter<HistoryEntry>,
}

impl SnapshotCursor {
    /// Create a cursor over an oldest-first snapshot.
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl HistoryCursor for SnapshotCursor {
    fn next_entry(&mut self) -> StoreResult<Option<HistoryEntry>> {
        Ok(self.entries.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryBody;
    use crate::error::StoreError;
    use keyline_types::{RecordKey, Timestamp};

    fn entry(seq: u64) -> HistoryEntry {
        HistoryEntry {
            key: RecordKey::new("k").unwrap(),
            seq,
            timestamp: Timestamp::new(seq, 0),
            body: EntryBody::Value(vec![seq as u8]),
        }
    }

    #[test]
    fn scan_yields_snapshot_in_order() {
        let scan = HistoryScan::new(Box::new(SnapshotCursor::new(vec![
            entry(1),
            entry(2),
            entry(3),
        ])));
        let seqs: Vec<u64> = scan.map(|r| r.unwrap().seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[test]
    fn empty_scan_yields_nothing() {
        let mut scan = HistoryScan::new(Box::new(SnapshotCursor::new(vec![])));
        assert!(scan.next().is_none());
        // Fused: stays exhausted.
        assert!(scan.next().is_none());
    }

    #[test]
    fn early_exit_is_allowed() {
        let mut scan = HistoryScan::new(Box::new(SnapshotCursor::new(vec![
            entry(1),
            entry(2),
            entry(3),
        ])));
        let first = scan.next().unwrap().unwrap();
        assert_eq!(first.seq, 1);
        drop(scan); // remaining entries released without being consumed
    }

    #[test]
    fn collect_entries_drains_everything() {
        let scan = HistoryScan::new(Box::new(SnapshotCursor::new(vec![entry(1), entry(2)])));
        let entries = scan.collect_entries().unwrap();
        assert_eq!(entries.len(), 2);
    }

    struct FailingCursor {
        yielded: bool,
    }

    impl HistoryCursor for FailingCursor {
        fn next_entry(&mut self) -> StoreResult<Option<HistoryEntry>> {
            if self.yielded {
                Err(StoreError::ReadOnly)
            } else {
                self.yielded = true;
                Ok(Some(entry(1)))
            }
        }
    }

    #[test]
    fn scan_fuses_after_error() {
        let mut scan = HistoryScan::new(Box::new(FailingCursor { yielded: false }));
        assert!(scan.next().unwrap().is_ok());
        assert!(scan.next().unwrap().is_err());
        // No further pulls after the error.
        assert!(scan.next().is_none());
    }

    #[test]
    fn collect_entries_stops_at_first_error() {
        let scan = HistoryScan::new(Box::new(FailingCursor { yielded: false }));
        assert!(scan.collect_entries().is_err());
    }
}
