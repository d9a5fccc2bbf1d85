//! Client error types.

use rust_decimal::Decimal;
use tally_shared::AppError;
use tally_shared::types::AccountNumber;
use thiserror::Error;

use crate::ports::StorageError;

/// Errors returned by client onboarding and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Name is empty after trimming.
    #[error("Client name must not be empty")]
    InvalidName,

    /// Opening balance below zero.
    #[error("Opening balance cannot be negative: {0}")]
    InvalidOpeningBalance(Decimal),

    /// No client owns the account.
    #[error("No client found for account {0}")]
    NotFound(AccountNumber),

    /// Storage failure.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ClientError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidOpeningBalance(_) => "INVALID_OPENING_BALANCE",
            Self::NotFound(_) => "CLIENT_NOT_FOUND",
            Self::Unexpected(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StorageError> for ClientError {
    fn from(err: StorageError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::InvalidName | ClientError::InvalidOpeningBalance(_) => {
                Self::Validation(message)
            }
            ClientError::NotFound(_) => Self::NotFound(message),
            ClientError::Unexpected(_) => Self::Internal(message),
        }
    }
}
