//! Record key validation.
//!
//! Valid record keys:
//! - Must be non-empty
//! - Must not contain NUL or other control characters
//! - Must not exceed [`MAX_KEY_LEN`] bytes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Maximum record key length in bytes.
pub const MAX_KEY_LEN: usize = 1024;

/// Identifier of a ledger record.
///
/// A thin wrapper over `String` that enforces the key rules once at
/// construction, so the store and registry layers never re-validate.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordKey(String);

impl RecordKey {
    /// Create a validated record key.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TypeError::InvalidKey {
                key,
                reason: "key must not be empty".into(),
            });
        }
        if key.len() > MAX_KEY_LEN {
            return Err(TypeError::InvalidKey {
                key,
                reason: format!("key exceeds {MAX_KEY_LEN} bytes"),
            });
        }
        if let Some(ch) = key.chars().find(|c| c.is_control()) {
            return Err(TypeError::InvalidKey {
                key: key.clone(),
                reason: format!("contains control character: {ch:?}"),
            });
        }
        Ok(Self(key))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for RecordKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordKey> for String {
    fn from(key: RecordKey) -> Self {
        key.0
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordKey({:?})", self.0)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_keys() {
        assert!(RecordKey::new("1001").is_ok());
        assert!(RecordKey::new("asset/1001").is_ok());
        assert!(RecordKey::new("securitized asset 1003").is_ok());
    }

    #[test]
    fn rejects_empty_key() {
        let err = RecordKey::new("").unwrap_err();
        assert!(matches!(err, TypeError::InvalidKey { .. }));
    }

    #[test]
    fn rejects_control_characters() {
        assert!(RecordKey::new("bad\0key").is_err());
        assert!(RecordKey::new("bad\nkey").is_err());
    }

    #[test]
    fn rejects_oversized_key() {
        let long = "k".repeat(MAX_KEY_LEN + 1);
        assert!(RecordKey::new(long).is_err());
    }

    #[test]
    fn boundary_length_is_accepted() {
        let max = "k".repeat(MAX_KEY_LEN);
        assert!(RecordKey::new(max).is_ok());
    }

    #[test]
    fn display_is_the_raw_key() {
        let key = RecordKey::new("1001").unwrap();
        assert_eq!(format!("{key}"), "1001");
        assert_eq!(key.as_str(), "1001");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = RecordKey::new("1001").unwrap();
        let b = RecordKey::new("1002").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip() {
        let key = RecordKey::new("asset-7").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"asset-7\"");
        let parsed: RecordKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn serde_rejects_invalid_key() {
        let result: Result<RecordKey, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
