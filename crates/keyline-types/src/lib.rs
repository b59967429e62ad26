//! Foundation types for the Keyline versioned asset registry.
//!
//! This crate provides the key and timestamp types used throughout the
//! Keyline system. Every other Keyline crate depends on `keyline-types`.
//!
//! # Key Types
//!
//! - [`RecordKey`] — Validated string identifier for a ledger record
//! - [`Timestamp`] — Store-assigned wall-clock write stamp with a logical
//!   tie-break counter
//! - [`TypeError`] — Validation failures for the above

pub mod error;
pub mod key;
pub mod temporal;

pub use error::TypeError;
pub use key::RecordKey;
pub use temporal::Timestamp;
