use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Store-assigned write stamp.
///
/// Combines a physical wall-clock component with a logical counter so that
/// entries written within the same millisecond remain totally ordered.
/// Timestamps are assigned by the store at write time, never by callers.
///
/// Ordering: `physical_ms` → `logical` (total order).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub physical_ms: u64,
    /// Logical counter for writes at the same physical time.
    pub logical: u32,
}

impl Timestamp {
    /// Create a timestamp with explicit values.
    pub fn new(physical_ms: u64, logical: u32) -> Self {
        Self {
            physical_ms,
            logical,
        }
    }

    /// Create a timestamp for the current wall-clock time.
    pub fn now() -> Self {
        let physical_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            physical_ms,
            logical: 0,
        }
    }

    /// The zero timestamp.
    pub const fn zero() -> Self {
        Self {
            physical_ms: 0,
            logical: 0,
        }
    }

    /// Produce a timestamp strictly after `self`, using the current
    /// wall clock when it has advanced and the logical counter otherwise.
    pub fn advance(&self) -> Self {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        if now_ms > self.physical_ms {
            Self {
                physical_ms: now_ms,
                logical: 0,
            }
        } else {
            Self {
                physical_ms: self.physical_ms,
                logical: self.logical + 1,
            }
        }
    }

    /// Returns `true` if this stamp is strictly after `other`.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.physical_ms
            .cmp(&other.physical_ms)
            .then(self.logical.cmp(&other.logical))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms.{})", self.physical_ms, self.logical)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.physical_ms, self.logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_physical_first() {
        let a = Timestamp::new(100, 5);
        let b = Timestamp::new(200, 0);
        assert!(a < b);
    }

    #[test]
    fn ordering_logical_second() {
        let a = Timestamp::new(100, 1);
        let b = Timestamp::new(100, 2);
        assert!(a < b);
    }

    #[test]
    fn now_produces_reasonable_timestamp() {
        let stamp = Timestamp::now();
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(stamp.physical_ms > 1_577_836_800_000);
        assert_eq!(stamp.logical, 0);
    }

    #[test]
    fn zero_is_smallest() {
        let zero = Timestamp::zero();
        let any = Timestamp::new(1, 0);
        assert!(zero < any);
    }

    #[test]
    fn advance_is_strictly_monotonic() {
        let mut stamp = Timestamp::now();
        for _ in 0..100 {
            let next = stamp.advance();
            assert!(next.is_after(&stamp));
            stamp = next;
        }
    }

    #[test]
    fn advance_from_future_bumps_logical() {
        // A stamp far in the future cannot be exceeded by the wall clock,
        // so advance must fall back to the logical counter.
        let future = Timestamp::new(u64::MAX - 1, 3);
        let next = future.advance();
        assert_eq!(next.physical_ms, future.physical_ms);
        assert_eq!(next.logical, 4);
    }

    #[test]
    fn serde_roundtrip() {
        let stamp = Timestamp::new(1234567890, 42);
        let json = serde_json::to_string(&stamp).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(stamp, parsed);
    }

    #[test]
    fn display_format() {
        let stamp = Timestamp::new(1000, 5);
        assert_eq!(format!("{stamp}"), "1000.5");
    }
}
