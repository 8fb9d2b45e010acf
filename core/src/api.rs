//! Executing client: one `Transport` round-trip per operation.
//!
//! `TransactionApi` glues the sans-IO `TransactionClient` to a `Transport`.
//! It holds no mutable state, so a shared reference can serve concurrent
//! callers whenever the transport allows it.

use tracing::{debug, warn};

use crate::client::TransactionClient;
use crate::config::Config;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Transaction, TransactionInput, TransactionStatus};

#[derive(Debug, Clone)]
pub struct TransactionApi<T = UreqTransport> {
    client: TransactionClient,
    transport: T,
}

impl TransactionApi<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> TransactionApi<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: TransactionClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TransactionClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_all(&self) -> Result<Vec<Transaction>, ApiError> {
        let response = self.send(Operation::ListAll, self.client.build_list_all())?;
        self.client.parse_list_all(response)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Transaction, ApiError> {
        let response = self.send(Operation::GetById, self.client.build_get_by_id(id))?;
        self.client.parse_get_by_id(response)
    }

    pub fn create(&self, input: &TransactionInput) -> Result<Transaction, ApiError> {
        let response = self.send(Operation::Create, self.client.build_create(input)?)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, id: &str, input: &TransactionInput) -> Result<Transaction, ApiError> {
        let response = self.send(Operation::Update, self.client.build_update(id, input)?)?;
        self.client.parse_update(response)
    }

    pub fn delete_by_id(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(Operation::DeleteById, self.client.build_delete_by_id(id))?;
        self.client.parse_delete_by_id(response)
    }

    pub fn list_by_sender(&self, sender: &str) -> Result<Vec<Transaction>, ApiError> {
        let response = self.send(Operation::ListBySender, self.client.build_list_by_sender(sender))?;
        self.client.parse_list_by_sender(response)
    }

    pub fn list_by_receiver(&self, receiver: &str) -> Result<Vec<Transaction>, ApiError> {
        let response = self.send(
            Operation::ListByReceiver,
            self.client.build_list_by_receiver(receiver),
        )?;
        self.client.parse_list_by_receiver(response)
    }

    pub fn list_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>, ApiError> {
        let response = self.send(Operation::ListByStatus, self.client.build_list_by_status(status))?;
        self.client.parse_list_by_status(response)
    }

    fn send(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(%operation, method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(&request)?;
        if response.is_success() {
            debug!(%operation, status = response.status, "request succeeded");
        } else {
            warn!(%operation, status = response.status, "server rejected request");
        }
        Ok(response)
    }
}
