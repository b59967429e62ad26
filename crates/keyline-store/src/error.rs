use keyline_types::RecordKey;

/// Errors from ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A conditional append required the key to be absent, but it is present.
    #[error("key already present: {0}")]
    KeyPresent(RecordKey),

    /// A conditional append required the key to be present, but it is absent.
    #[error("key absent: {0}")]
    KeyAbsent(RecordKey),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
