//! Client routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tally_core::client::ClientWithAccount;
use tally_shared::types::AccountNumber;

use crate::AppState;
use crate::extract::{ApiJson, ApiPath};
use crate::error::client_error_response;

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/{account_number}", get(get_client))
}

/// Request body for onboarding a client.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    /// Client name.
    pub name: String,
    /// Opening balance of the new account.
    pub balance: Decimal,
}

/// A client with its account.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client ID.
    pub id: i32,
    /// Client name.
    pub name: String,
    /// Account number.
    pub account_number: i32,
    /// Current account balance.
    pub account_balance: String,
}

impl From<ClientWithAccount> for ClientResponse {
    fn from(value: ClientWithAccount) -> Self {
        Self {
            id: value.client.id.into_inner(),
            name: value.client.name,
            account_number: value.client.account_number.into_inner(),
            account_balance: value.account.balance().to_string(),
        }
    }
}

/// POST `/clients` - Open an account and a client owning it.
async fn create_client(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateClientRequest>,
) -> impl IntoResponse {
    match state
        .clients
        .create_account_and_client(&payload.name, payload.balance)
        .await
    {
        Ok(created) => (StatusCode::CREATED, Json(ClientResponse::from(created))).into_response(),
        Err(e) => client_error_response(e),
    }
}

/// GET `/clients` - List every client.
async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    match state.clients.list_clients().await {
        Ok(clients) => {
            let items: Vec<ClientResponse> = clients.into_iter().map(ClientResponse::from).collect();
            (StatusCode::OK, Json(json!({ "clients": items }))).into_response()
        }
        Err(e) => client_error_response(e),
    }
}

/// GET `/clients/{account_number}` - Client owning an account.
async fn get_client(
    State(state): State<AppState>,
    ApiPath(account_number): ApiPath<i32>,
) -> impl IntoResponse {
    match state
        .clients
        .get_by_account_number(AccountNumber::new(account_number))
        .await
    {
        Ok(client) => (StatusCode::OK, Json(ClientResponse::from(client))).into_response(),
        Err(e) => client_error_response(e),
    }
}
