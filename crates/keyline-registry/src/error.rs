use keyline_store::StoreError;
use keyline_types::RecordKey;

/// Errors produced by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Creation requested for a key whose current state is present.
    #[error("asset {0} already exists")]
    AlreadyExists(RecordKey),

    /// Read/update/delete requested for a key whose current state is absent.
    #[error("asset {0} does not exist")]
    NotFound(RecordKey),

    /// Stored bytes for a key do not decode into the envelope shape.
    #[error("corrupt envelope for {key}: {reason}")]
    Codec { key: RecordKey, reason: String },

    /// Underlying store failure during get/put/delete/history access.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A dispatch request was malformed (missing or unexpected arguments).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A dispatch request named an operation this registry does not expose.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
