//! Extractors that report malformed input in the API error envelope.

use axum::{
    extract::{FromRequest, FromRequestParts, rejection::JsonRejection, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use tally_shared::AppError;

use crate::error::error_response;

/// Error code for bodies and path segments that cannot be decoded.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// `axum::Json` with an enveloped rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RequestRejection))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with an enveloped rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RequestRejection))]
pub struct ApiPath<T>(pub T);

/// A request that failed to decode, rendered as `400 INVALID_REQUEST`.
#[derive(Debug)]
pub struct RequestRejection(String);

impl From<JsonRejection> for RequestRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection.body_text())
    }
}

impl From<PathRejection> for RequestRejection {
    fn from(rejection: PathRejection) -> Self {
        Self(rejection.body_text())
    }
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        error_response(AppError::Validation(self.0), INVALID_REQUEST)
    }
}
