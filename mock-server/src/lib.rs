use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Status::Pending),
            "COMPLETED" => Ok(Status::Completed),
            "FAILED" => Ok(Status::Failed),
            "CANCELLED" => Ok(Status::Cancelled),
            other => Err(format!("unknown status {other:?}")),
        }
    }
}

/// Stored record. Ids are sequential integers, serialized as JSON numbers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub sender: String,
    pub receiver: String,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
    pub status: Status,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionInput {
    pub sender: String,
    pub receiver: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
}

impl TransactionInput {
    fn validate(&self) -> Result<(), Rejection> {
        for (field, value) in [
            ("sender", &self.sender),
            ("receiver", &self.receiver),
            ("currency", &self.currency),
        ] {
            if value.trim().is_empty() {
                return Err(Rejection::bad_request(format!("{field} must not be blank")));
            }
        }
        if self.amount <= Decimal::ZERO {
            return Err(Rejection::bad_request("amount must be positive"));
        }
        Ok(())
    }
}

/// Error response: a status code plus a `{"error": ...}` JSON body.
#[derive(Debug)]
pub struct Rejection {
    status: StatusCode,
    message: String,
}

impl Rejection {
    fn bad_request(message: impl fmt::Display) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn not_found(id: u64) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("transaction {id} not found"),
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    transactions: BTreeMap<u64, Transaction>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/api/transactions/{id}",
            get(get_transaction).put(update_transaction).delete(delete_transaction),
        )
        .route("/api/transactions/sender/{sender}", get(list_by_sender))
        .route("/api/transactions/receiver/{receiver}", get(list_by_receiver))
        .route("/api/transactions/status/{status}", get(list_by_status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

async fn filtered<F>(db: &Db, keep: F) -> Json<Vec<Transaction>>
where
    F: Fn(&Transaction) -> bool,
{
    let store = db.read().await;
    Json(store.transactions.values().filter(|tx| keep(tx)).cloned().collect())
}

async fn list_transactions(State(db): State<Db>) -> Json<Vec<Transaction>> {
    filtered(&db, |_| true).await
}

async fn list_by_sender(State(db): State<Db>, Path(sender): Path<String>) -> Json<Vec<Transaction>> {
    filtered(&db, |tx| tx.sender == sender).await
}

async fn list_by_receiver(
    State(db): State<Db>,
    Path(receiver): Path<String>,
) -> Json<Vec<Transaction>> {
    filtered(&db, |tx| tx.receiver == receiver).await
}

async fn list_by_status(
    State(db): State<Db>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Transaction>>, Rejection> {
    let status: Status = status.parse().map_err(Rejection::bad_request)?;
    Ok(filtered(&db, |tx| tx.status == status).await)
}

async fn create_transaction(
    State(db): State<Db>,
    Json(input): Json<TransactionInput>,
) -> Result<(StatusCode, Json<Transaction>), Rejection> {
    input.validate()?;
    let mut store = db.write().await;
    store.next_id += 1;
    let tx = Transaction {
        id: store.next_id,
        sender: input.sender,
        receiver: input.receiver,
        amount: input.amount,
        currency: input.currency,
        description: input.description,
        status: input.status,
        created_at: now(),
        updated_at: None,
    };
    store.transactions.insert(tx.id, tx.clone());
    info!(id = tx.id, "created transaction");
    Ok((StatusCode::CREATED, Json(tx)))
}

async fn get_transaction(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Transaction>, Rejection> {
    let store = db.read().await;
    store.transactions.get(&id).cloned().map(Json).ok_or_else(|| Rejection::not_found(id))
}

async fn update_transaction(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TransactionInput>,
) -> Result<Json<Transaction>, Rejection> {
    input.validate()?;
    let mut store = db.write().await;
    let tx = store.transactions.get_mut(&id).ok_or_else(|| Rejection::not_found(id))?;
    tx.sender = input.sender;
    tx.receiver = input.receiver;
    tx.amount = input.amount;
    tx.currency = input.currency;
    tx.description = input.description;
    tx.status = input.status;
    tx.updated_at = Some(now());
    info!(id, "updated transaction");
    Ok(Json(tx.clone()))
}

/// Deleting an unknown id still answers 204.
async fn delete_transaction(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    if db.write().await.transactions.remove(&id).is_some() {
        info!(id, "deleted transaction");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn sample() -> Transaction {
        Transaction {
            id: 7,
            sender: "Frank".to_string(),
            receiver: "Gina".to_string(),
            amount: dec!(120.5),
            currency: "USD".to_string(),
            description: None,
            status: Status::Pending,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn transaction_serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["sender"], "Frank");
        assert_eq!(json["amount"].as_f64(), Some(120.5));
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert!(json["description"].is_null());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn input_defaults_status_to_pending() {
        let input: TransactionInput = serde_json::from_str(
            r#"{"sender":"A","receiver":"B","amount":10,"currency":"USD"}"#,
        )
        .unwrap();
        assert_eq!(input.status, Status::Pending);
        assert!(input.description.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn input_rejects_unknown_status() {
        let result: Result<TransactionInput, _> = serde_json::from_str(
            r#"{"sender":"A","receiver":"B","amount":10,"currency":"USD","status":"LOST"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validation_rejects_blank_fields_and_non_positive_amounts() {
        let blank: TransactionInput = serde_json::from_str(
            r#"{"sender":" ","receiver":"B","amount":10,"currency":"USD"}"#,
        )
        .unwrap();
        let err = blank.validate().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "sender must not be blank");

        let zero: TransactionInput = serde_json::from_str(
            r#"{"sender":"A","receiver":"B","amount":0,"currency":"USD"}"#,
        )
        .unwrap();
        assert_eq!(zero.validate().unwrap_err().message, "amount must be positive");
    }

    #[test]
    fn status_parses_wire_names_only() {
        assert_eq!("COMPLETED".parse::<Status>(), Ok(Status::Completed));
        assert!("completed".parse::<Status>().is_err());
    }
}
