//! Named-operation dispatch for hosting transaction environments.
//!
//! Hosts that route invocations by operation name (the original contract
//! superclass dispatched on method names) go through an explicit table:
//! parse the name into an [`Operation`], build an [`OperationRequest`], and
//! hand it to the [`Dispatcher`]. Caller identity supplied by the host is
//! deliberately not part of the request; this core never consults it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use keyline_store::LedgerStore;
use keyline_types::RecordKey;

use crate::envelope::AssetEnvelope;
use crate::error::{RegistryError, RegistryResult};
use crate::service::{AssetRegistry, HistoryRecord};

/// The operations a registry exposes by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Exists,
    Create,
    Read,
    Update,
    Delete,
    History,
}

impl Operation {
    /// Returns `true` if the operation takes a value argument.
    pub fn takes_value(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl FromStr for Operation {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exists" => Ok(Self::Exists),
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "history" => Ok(Self::History),
            other => Err(RegistryError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exists => "exists",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::History => "history",
        };
        f.write_str(name)
    }
}

/// One inbound invocation from the hosting environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub operation: Operation,
    pub key: RecordKey,
    /// Value argument; required for `create`/`update`, forbidden otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl OperationRequest {
    /// Build a request without a value argument.
    pub fn new(operation: Operation, key: RecordKey) -> Self {
        Self {
            operation,
            key,
            value: None,
        }
    }

    /// Build a request carrying a value argument.
    pub fn with_value(operation: Operation, key: RecordKey, value: impl Into<Value>) -> Self {
        Self {
            operation,
            key,
            value: Some(value.into()),
        }
    }
}

/// The outcome of a dispatched operation, as plain data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationResponse {
    Exists(bool),
    Created,
    Asset(AssetEnvelope),
    Updated,
    Deleted,
    History(Vec<HistoryRecord>),
}

/// Explicit operation table mapping requests to registry calls.
pub struct Dispatcher<S: LedgerStore> {
    registry: AssetRegistry<S>,
}

impl<S: LedgerStore> Dispatcher<S> {
    /// Wrap a registry.
    pub fn new(registry: AssetRegistry<S>) -> Self {
        Self { registry }
    }

    /// Borrow the wrapped registry.
    pub fn registry(&self) -> &AssetRegistry<S> {
        &self.registry
    }

    /// Route one request to its handler.
    ///
    /// Argument arity is checked before any store access: a missing value
    /// for `create`/`update`, or a stray value on any other operation, is a
    /// [`RegistryError::BadRequest`] and touches nothing. Each value-taking
    /// arm binds its `Value` out of the arity check, so a handler can never
    /// run with a defaulted or absent value.
    pub fn dispatch(&self, request: OperationRequest) -> RegistryResult<OperationResponse> {
        let OperationRequest {
            operation,
            key,
            value,
        } = request;

        match operation {
            Operation::Exists => {
                forbid_value(operation, value)?;
                Ok(OperationResponse::Exists(self.registry.exists(&key)?))
            }
            Operation::Create => {
                let value = require_value(operation, value)?;
                self.registry.create(&key, value)?;
                Ok(OperationResponse::Created)
            }
            Operation::Read => {
                forbid_value(operation, value)?;
                Ok(OperationResponse::Asset(self.registry.read(&key)?))
            }
            Operation::Update => {
                let value = require_value(operation, value)?;
                self.registry.update(&key, value)?;
                Ok(OperationResponse::Updated)
            }
            Operation::Delete => {
                forbid_value(operation, value)?;
                self.registry.delete(&key)?;
                Ok(OperationResponse::Deleted)
            }
            Operation::History => {
                forbid_value(operation, value)?;
                Ok(OperationResponse::History(self.registry.history(&key)?))
            }
        }
    }
}

fn require_value(operation: Operation, value: Option<Value>) -> RegistryResult<Value> {
    value.ok_or_else(|| {
        RegistryError::BadRequest(format!("operation {operation} requires a value"))
    })
}

fn forbid_value(operation: Operation, value: Option<Value>) -> RegistryResult<()> {
    match value {
        None => Ok(()),
        Some(_) => Err(RegistryError::BadRequest(format!(
            "operation {operation} takes no value"
        ))),
    }
}

impl<S: LedgerStore + fmt::Debug> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}

/// One decoded history sequence, for hosts that want `Vec<HistoryRecord>`
/// without matching on [`OperationResponse`].
pub fn expect_history(response: OperationResponse) -> RegistryResult<Vec<HistoryRecord>> {
    match response {
        OperationResponse::History(records) => Ok(records),
        other => Err(RegistryError::BadRequest(format!(
            "expected a history response, got {other:?}"
        ))),
    }
}
