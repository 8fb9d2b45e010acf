//! Error types for the transactions API client.
//!
//! # Design
//! Every non-2xx response becomes `RequestFailure`, whose `Display` is the
//! fixed message of the operation that failed ("Failed to fetch
//! transactions", ...). The status code and raw body ride along as fields so
//! callers can inspect what the server said without the message changing.
//! A 2xx response whose body is not a valid transaction is a `Decode` error,
//! never a half-filled record.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// The client operations, used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListAll,
    GetById,
    Create,
    Update,
    DeleteById,
    ListBySender,
    ListByReceiver,
    ListByStatus,
}

impl Operation {
    /// Fixed message reported when the server answers with a non-success status.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::ListAll => "Failed to fetch transactions",
            Operation::GetById => "Failed to fetch transaction",
            Operation::Create => "Failed to create transaction",
            Operation::Update => "Failed to update transaction",
            Operation::DeleteById => "Failed to delete transaction",
            Operation::ListBySender => "Failed to fetch transactions by sender",
            Operation::ListByReceiver => "Failed to fetch transactions by receiver",
            Operation::ListByStatus => "Failed to fetch transactions by status",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListAll => "list_all",
            Operation::GetById => "get_by_id",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::DeleteById => "delete_by_id",
            Operation::ListBySender => "list_by_sender",
            Operation::ListByReceiver => "list_by_receiver",
            Operation::ListByStatus => "list_by_status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors returned by `TransactionClient` and `TransactionApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("{}", .operation.failure_message())]
    RequestFailure {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// The server answered 2xx but the body is not the expected shape.
    #[error("{operation}: malformed response body")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body")]
    Serialization(#[source] serde_json::Error),

    /// The transport failed before any response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// HTTP status of a `RequestFailure`, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The operation a request or decode failure belongs to.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::RequestFailure { operation, .. } | ApiError::Decode { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }
}

/// Failure raised by a `Transport` before it produced a response, e.g. DNS
/// resolution, connection refused or a timeout.
///
/// Displays as the transport's own error and forwards its source.
#[derive(Debug)]
pub struct TransportError(Box<dyn StdError + Send + Sync + 'static>);

impl TransportError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self(error.into())
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} value {value:?}: expected a positive number of seconds")]
    InvalidTimeout { name: &'static str, value: String },
}
