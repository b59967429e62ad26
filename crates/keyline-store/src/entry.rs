use serde::{Deserialize, Serialize};

use keyline_types::{RecordKey, Timestamp};

/// What a history entry did to its record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryBody {
    /// The record was set to these opaque bytes.
    Value(Vec<u8>),
    /// The record was deleted. Its history remains queryable.
    Tombstone,
}

impl EntryBody {
    /// The stored bytes, or `None` for a tombstone.
    pub fn value(&self) -> Option<&[u8]> {
        match self {
            Self::Value(bytes) => Some(bytes),
            Self::Tombstone => None,
        }
    }

    /// Returns `true` if this body marks a deletion.
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }
}

impl std::fmt::Debug for EntryBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(bytes) => write!(f, "Value({} bytes)", bytes.len()),
            Self::Tombstone => write!(f, "Tombstone"),
        }
    }
}

/// One immutable snapshot of a record's value or its deletion.
///
/// Entries for a key are totally ordered by `seq`, starting at 1. The
/// timestamp is assigned by the store at write time, never by callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The record this entry belongs to.
    pub key: RecordKey,
    /// Position in the record's history, starting at 1.
    pub seq: u64,
    /// Store-assigned write stamp.
    pub timestamp: Timestamp,
    /// The value written, or a tombstone.
    pub body: EntryBody,
}

impl HistoryEntry {
    /// Returns `true` if this entry marks a deletion.
    pub fn is_tombstone(&self) -> bool {
        self.body.is_tombstone()
    }

    /// The stored bytes, or `None` for a tombstone.
    pub fn value(&self) -> Option<&[u8]> {
        self.body.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> RecordKey {
        RecordKey::new(s).unwrap()
    }

    #[test]
    fn value_entry_exposes_bytes() {
        let entry = HistoryEntry {
            key: key("1001"),
            seq: 1,
            timestamp: Timestamp::new(100, 0),
            body: EntryBody::Value(b"abc".to_vec()),
        };
        assert!(!entry.is_tombstone());
        assert_eq!(entry.value(), Some(&b"abc"[..]));
    }

    #[test]
    fn tombstone_has_no_value() {
        let entry = HistoryEntry {
            key: key("1001"),
            seq: 2,
            timestamp: Timestamp::new(100, 1),
            body: EntryBody::Tombstone,
        };
        assert!(entry.is_tombstone());
        assert_eq!(entry.value(), None);
    }

    #[test]
    fn debug_elides_value_bytes() {
        let body = EntryBody::Value(vec![0u8; 64]);
        assert_eq!(format!("{body:?}"), "Value(64 bytes)");
    }
}
