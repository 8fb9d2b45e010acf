//! Stateless HTTP request builder and response parser for the transactions API.
//!
//! # Design
//! `TransactionClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round-trip is someone else's job (see
//! `TransactionApi`), keeping this half deterministic and free of I/O.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Transaction, TransactionInput, TransactionStatus};

const COLLECTION: &str = "/api/transactions";

/// Characters left untouched in a path segment (RFC 3986 unreserved).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Synchronous, stateless client for the transactions API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    base_url: String,
}

impl TransactionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_all(&self) -> HttpRequest {
        self.get(format!("{}{COLLECTION}", self.base_url))
    }

    /// An empty `id` yields `/api/transactions/` with a trailing slash; servers
    /// that fold it onto the collection answer with a list, which then fails
    /// to decode as a single record.
    pub fn build_get_by_id(&self, id: &str) -> HttpRequest {
        self.get(self.item_url(id))
    }

    pub fn build_create(&self, input: &TransactionInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}{COLLECTION}", self.base_url), input)
    }

    pub fn build_update(&self, id: &str, input: &TransactionInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.item_url(id), input)
    }

    /// Same empty-`id` caveat as `build_get_by_id`.
    pub fn build_delete_by_id(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_by_sender(&self, sender: &str) -> HttpRequest {
        self.get(self.filter_url("sender", sender))
    }

    pub fn build_list_by_receiver(&self, receiver: &str) -> HttpRequest {
        self.get(self.filter_url("receiver", receiver))
    }

    pub fn build_list_by_status(&self, status: TransactionStatus) -> HttpRequest {
        self.get(self.filter_url("status", status.as_str()))
    }

    pub fn parse_list_all(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        decode(Operation::ListAll, response)
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        decode(Operation::GetById, response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        decode(Operation::Create, response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        decode(Operation::Update, response)
    }

    /// The body of a successful delete is ignored.
    pub fn parse_delete_by_id(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(Operation::DeleteById, response).map(drop)
    }

    pub fn parse_list_by_sender(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        decode(Operation::ListBySender, response)
    }

    pub fn parse_list_by_receiver(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        decode(Operation::ListByReceiver, response)
    }

    pub fn parse_list_by_status(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        decode(Operation::ListByStatus, response)
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{COLLECTION}/{}", self.base_url, utf8_percent_encode(id, SEGMENT))
    }

    fn filter_url(&self, field: &str, value: &str) -> String {
        format!(
            "{}{COLLECTION}/{field}/{}",
            self.base_url,
            utf8_percent_encode(value, SEGMENT)
        )
    }
}

fn json_request(method: HttpMethod, url: String, input: &TransactionInput) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Turn any non-2xx status into a `RequestFailure` carrying status and body.
fn check_status(operation: Operation, response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::RequestFailure {
        operation,
        status: response.status,
        body: response.body,
    })
}

fn decode<T: DeserializeOwned>(operation: Operation, response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(operation, response)?;
    serde_json::from_str(&response.body).map_err(|source| ApiError::Decode { operation, source })
}
