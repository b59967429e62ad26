use serde::{Deserialize, Serialize};
use tracing::debug;

use keyline_store::{HistoryEntry, LedgerStore, StoreError};
use keyline_types::{RecordKey, Timestamp};

use crate::envelope::AssetEnvelope;
use crate::error::{RegistryError, RegistryResult};

/// What one history record did to its asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordChange {
    /// The asset was set to this envelope.
    Set(AssetEnvelope),
    /// The asset was deleted.
    Deleted,
}

/// One decoded entry of an asset's mutation history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Position in the asset's history, starting at 1.
    pub seq: u64,
    /// Store-assigned write stamp.
    pub timestamp: Timestamp,
    /// The mutation this record captured.
    pub change: RecordChange,
}

/// Business-logic layer over a [`LedgerStore`].
///
/// Enforces the existence preconditions (no double-create, no mutation of
/// the absent) and owns the [`AssetEnvelope`] encoding; the store only ever
/// sees opaque bytes. Each operation is one existence check plus at most
/// one mutation; the store's conditional appends make the pair atomic, so
/// two concurrent creates on the same absent key admit exactly one winner.
pub struct AssetRegistry<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> AssetRegistry<S> {
    /// Create a registry over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` iff the asset currently exists (latest history entry
    /// is not a tombstone).
    pub fn exists(&self, key: &RecordKey) -> RegistryResult<bool> {
        Ok(self.store.exists(key)?)
    }

    /// Create an asset. Fails with [`RegistryError::AlreadyExists`] if the
    /// key is currently present; no write reaches the store in that case.
    pub fn create(&self, key: &RecordKey, value: impl Into<serde_json::Value>) -> RegistryResult<()> {
        let bytes = self.encode(key, &AssetEnvelope::new(value))?;
        match self.store.put_if_absent(key, &bytes) {
            Ok(entry) => {
                debug!(key = %key, seq = entry.seq, "asset created");
                Ok(())
            }
            Err(StoreError::KeyPresent(key)) => Err(RegistryError::AlreadyExists(key)),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the asset's current value. Fails with
    /// [`RegistryError::NotFound`] if the key is currently absent.
    pub fn read(&self, key: &RecordKey) -> RegistryResult<AssetEnvelope> {
        match self.store.get_current(key)? {
            Some(bytes) => self.decode(key, &bytes),
            None => Err(RegistryError::NotFound(key.clone())),
        }
    }

    /// Update an existing asset. Fails with [`RegistryError::NotFound`] if
    /// the key is currently absent; no write reaches the store in that case.
    pub fn update(&self, key: &RecordKey, value: impl Into<serde_json::Value>) -> RegistryResult<()> {
        let bytes = self.encode(key, &AssetEnvelope::new(value))?;
        match self.store.put_if_present(key, &bytes) {
            Ok(entry) => {
                debug!(key = %key, seq = entry.seq, "asset updated");
                Ok(())
            }
            Err(StoreError::KeyAbsent(key)) => Err(RegistryError::NotFound(key)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an existing asset by appending a tombstone. Fails with
    /// [`RegistryError::NotFound`] if the key is currently absent. The
    /// asset's history remains queryable afterwards.
    pub fn delete(&self, key: &RecordKey) -> RegistryResult<()> {
        match self.store.delete_if_present(key) {
            Ok(entry) => {
                debug!(key = %key, seq = entry.seq, "asset deleted");
                Ok(())
            }
            Err(StoreError::KeyAbsent(key)) => Err(RegistryError::NotFound(key)),
            Err(e) => Err(e.into()),
        }
    }

    /// The asset's full mutation history, oldest-first, deletions included.
    ///
    /// Fails with [`RegistryError::NotFound`] only when the key has no
    /// history at all; a currently deleted asset's history is still
    /// returned, since the audit trail outlives the asset.
    pub fn history(&self, key: &RecordKey) -> RegistryResult<Vec<HistoryRecord>> {
        let mut records = Vec::new();
        for entry in self.store.history(key)? {
            let entry = entry?;
            records.push(self.decode_entry(key, entry)?);
        }
        if records.is_empty() {
            return Err(RegistryError::NotFound(key.clone()));
        }
        debug!(key = %key, records = records.len(), "history scanned");
        Ok(records)
    }

    fn encode(&self, key: &RecordKey, envelope: &AssetEnvelope) -> RegistryResult<Vec<u8>> {
        envelope.encode().map_err(|e| RegistryError::Codec {
            key: key.clone(),
            reason: e.to_string(),
        })
    }

    fn decode(&self, key: &RecordKey, bytes: &[u8]) -> RegistryResult<AssetEnvelope> {
        AssetEnvelope::decode(bytes).map_err(|e| RegistryError::Codec {
            key: key.clone(),
            reason: e.to_string(),
        })
    }

    fn decode_entry(&self, key: &RecordKey, entry: HistoryEntry) -> RegistryResult<HistoryRecord> {
        let change = match entry.value() {
            Some(bytes) => RecordChange::Set(self.decode(key, bytes)?),
            None => RecordChange::Deleted,
        };
        Ok(HistoryRecord {
            seq: entry.seq,
            timestamp: entry.timestamp,
            change,
        })
    }
}

impl<S: LedgerStore + std::fmt::Debug> std::fmt::Debug for AssetRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("store", &self.store)
            .finish()
    }
}
