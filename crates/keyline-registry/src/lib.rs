//! Asset registry service layer for Keyline.
//!
//! This crate sits between a hosting transaction environment and the
//! [`keyline_store`] ledger. It provides:
//! - [`AssetRegistry`] — create/read/update/delete/history with existence
//!   preconditions (no double-create, no mutation of the absent)
//! - [`AssetEnvelope`] — the fixed-shape JSON wrapper encoded around every
//!   stored value; the store itself only ever sees opaque bytes
//! - [`Dispatcher`] — an explicit named-operation dispatch table for hosts
//!   that route requests by operation name
//! - [`RegistryError`] — the domain error taxonomy
//!
//! The registry holds no state of its own; every operation is one existence
//! check plus at most one store mutation, performed atomically by the
//! store's conditional appends.

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod service;

pub use dispatch::{Dispatcher, Operation, OperationRequest, OperationResponse};
pub use envelope::AssetEnvelope;
pub use error::{RegistryError, RegistryResult};
pub use service::{AssetRegistry, HistoryRecord, RecordChange};
