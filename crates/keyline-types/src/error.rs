use thiserror::Error;

/// Errors produced by type validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid record key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },
}
