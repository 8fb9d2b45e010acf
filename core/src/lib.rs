//! Blocking API client core for the transactions service.
//!
//! # Overview
//! `TransactionClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern).
//! `TransactionApi` pairs it with a `Transport` (ureq by default) and exposes
//! one method per operation: list, get, create, update, delete, plus the
//! sender/receiver/status filters.
//!
//! # Design
//! - Both client types are stateless; `TransactionClient` holds only
//!   `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and every request shape is unit-testable.
//! - Any 2xx is success. Non-2xx becomes `ApiError::RequestFailure` with the
//!   operation's fixed message; bodies that do not decode into a valid
//!   `Transaction` become `ApiError::Decode`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::TransactionApi;
pub use client::TransactionClient;
pub use config::Config;
pub use error::{ApiError, ConfigError, Operation, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Transaction, TransactionInput, TransactionStatus};
