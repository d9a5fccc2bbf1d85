//! Error responses.
//!
//! Bodies are `{ "error": CODE, "message": ... }`. Server-side failures are
//! logged and reported with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tally_core::client::ClientError;
use tally_core::transfer::TransferError;
use tally_shared::AppError;
use tracing::error;

/// Builds a response for `err`, reported under `code`.
pub fn error_response(err: AppError, code: &str) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if err.is_client_facing() {
        err.message().to_string()
    } else {
        error!(error = %err, code, "Request failed");
        "An error occurred".to_string()
    };

    (
        status,
        Json(json!({
            "error": code,
            "message": message
        })),
    )
        .into_response()
}

/// Response for a transfer engine error.
pub fn transfer_error_response(err: TransferError) -> Response {
    let code = err.error_code();
    error_response(err.into(), code)
}

/// Response for a client service error.
pub fn client_error_response(err: ClientError) -> Response {
    let code = err.error_code();
    error_response(err.into(), code)
}
