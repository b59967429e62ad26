//! The asset value envelope.
//!
//! Every value reaching the store is wrapped in a single fixed shape,
//! `{"value": <JSON>}`, serialized as compact JSON. The shape is closed
//! (`deny_unknown_fields`): bytes carrying extra or renamed fields are a
//! codec error, not a silently accepted variant. Adding a second field is
//! an explicit schema migration, not a decode-time fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed-shape wrapper encoded around a record's raw value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEnvelope {
    /// The asset's opaque, JSON-serializable value.
    pub value: Value,
}

impl AssetEnvelope {
    /// Wrap a value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Encode to the canonical compact JSON byte form stored in the ledger.
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode stored bytes back into an envelope.
    pub fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
