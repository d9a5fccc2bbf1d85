//! Transfer routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tally_core::transfer::Transfer;
use tally_shared::types::AccountNumber;

use crate::AppState;
use crate::extract::{ApiJson, ApiPath};
use crate::error::transfer_error_response;

/// Creates the transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", post(create_transfer))
        .route("/transfers/{account_number}", get(list_transfers))
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    /// Account to debit.
    pub origin_account_number: i32,
    /// Account to credit.
    pub destination_account_number: i32,
    /// Amount to move.
    pub amount: Decimal,
}

/// A recorded transfer attempt.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    /// Transfer ID.
    pub id: i64,
    /// Debited account.
    pub origin_account_number: i32,
    /// Credited account.
    pub destination_account_number: i32,
    /// Requested amount.
    pub amount: String,
    /// Whether balances moved.
    pub success: bool,
    /// `committed` or `rejected`.
    pub state: String,
    /// Attempt timestamp (RFC 3339).
    pub created_at: String,
}

impl From<Transfer> for TransferResponse {
    fn from(t: Transfer) -> Self {
        Self {
            id: t.id.into_inner(),
            origin_account_number: t.origin_account_number.into_inner(),
            destination_account_number: t.destination_account_number.into_inner(),
            amount: t.amount.to_string(),
            success: t.success,
            state: t.state().to_string(),
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// POST `/transfers` - Attempt a transfer.
async fn create_transfer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTransferRequest>,
) -> impl IntoResponse {
    let result = state
        .transfers
        .create_transfer(
            AccountNumber::new(payload.origin_account_number),
            AccountNumber::new(payload.destination_account_number),
            payload.amount,
        )
        .await;

    match result {
        Ok(transfer) => {
            (StatusCode::CREATED, Json(TransferResponse::from(transfer))).into_response()
        }
        Err(e) => transfer_error_response(e),
    }
}

/// GET `/transfers/{account_number}` - History of an account, newest first.
async fn list_transfers(
    State(state): State<AppState>,
    ApiPath(account_number): ApiPath<i32>,
) -> impl IntoResponse {
    match state
        .transfers
        .list_transfers_for_account(AccountNumber::new(account_number))
        .await
    {
        Ok(transfers) => {
            let items: Vec<TransferResponse> =
                transfers.into_iter().map(TransferResponse::from).collect();
            (StatusCode::OK, Json(json!({ "transfers": items }))).into_response()
        }
        Err(e) => transfer_error_response(e),
    }
}
