//! Transaction routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_core::ledger::{PostTransactionInput, Transaction};
use tallybook_shared::types::{AccountId, OperationTypeId};
use tracing::info;
use utoipa::ToSchema;

use crate::{
    AppState,
    error::{ApiError, ErrorResponse},
};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", post(create_transaction))
}

/// Request body for posting a transaction.
///
/// Every field is optional here so that a missing field is reported by name
/// instead of as a generic body rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Account to post against.
    #[schema(example = 1)]
    pub account_id: Option<i64>,
    /// Operation type ID (1-4).
    #[schema(example = 4)]
    pub operation_type_id: Option<i32>,
    /// Amount in any sign; stored with the operation type's sign, rounded to
    /// four decimal places.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 123.45)]
    pub amount: Option<Decimal>,
}

impl From<CreateTransactionRequest> for PostTransactionInput {
    fn from(request: CreateTransactionRequest) -> Self {
        Self {
            account_id: request.account_id.map(AccountId::new),
            operation_type_id: request.operation_type_id.map(OperationTypeId::new),
            amount: request.amount,
        }
    }
}

/// Response for a transaction.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub transaction_id: i64,
    /// Account ID.
    pub account_id: i64,
    /// Operation type ID.
    pub operation_type_id: i32,
    /// Signed amount.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = -50.0)]
    pub amount: Decimal,
    /// Posting timestamp (UTC).
    pub event_date: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            transaction_id: tx.id.into_inner(),
            account_id: tx.account_id.into_inner(),
            operation_type_id: tx.operation_type_id.into_inner(),
            amount: tx.amount,
            event_date: tx.event_date,
        }
    }
}

/// POST `/transactions` - Append a transaction to an account's ledger.
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionResponse),
        (status = 400, description = "Missing field, amount out of range, or unknown account or operation type", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;

    let tx = state.recorder().post(payload.into()).await?;
    info!(
        transaction_id = %tx.id,
        account_id = %tx.account_id,
        operation_type_id = %tx.operation_type_id,
        amount = %tx.amount,
        "Transaction posted"
    );

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(tx))))
}
