//! Transfer error types.

use rust_decimal::Decimal;
use tally_shared::types::AccountNumber;
use tally_shared::{AppError, ConfigurationError};
use thiserror::Error;

use super::policy::Rejection;
use super::types::AccountRole;
use crate::account::AccountError;
use crate::ports::StorageError;

/// Errors returned by the transfer engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    // ========== Rejections (an audit record was written) ==========
    /// Amount outside the configured bounds.
    #[error("Transfer amount {amount} is outside the allowed range [{min}, {max}]")]
    AmountOutOfRange {
        /// Requested amount.
        amount: Decimal,
        /// Configured minimum, inclusive.
        min: Decimal,
        /// Configured maximum, inclusive.
        max: Decimal,
    },

    /// Origin or destination account does not exist.
    #[error("The {role} account {number} was not found")]
    AccountNotFound {
        /// Which side of the transfer is missing.
        role: AccountRole,
        /// The requested account number.
        number: AccountNumber,
    },

    /// Origin cannot afford the amount.
    #[error("Account {number} cannot transfer {amount}")]
    TransferNotAllowed {
        /// The origin account.
        number: AccountNumber,
        /// Requested amount.
        amount: Decimal,
    },

    // ========== Configuration ==========
    /// A transfer limit is not configured.
    #[error("Missing configuration value '{0}'")]
    MissingConfiguration(String),

    /// A transfer limit is configured but unusable.
    #[error("Invalid configuration value '{value}' for '{key}': {reason}")]
    InvalidConfiguration {
        /// The configuration key.
        key: String,
        /// The raw value.
        value: String,
        /// Why it was refused.
        reason: String,
    },

    // ========== Persistence ==========
    /// An account changed between load and update.
    #[error("Account {0} was modified concurrently, please retry")]
    ConcurrentModification(AccountNumber),

    /// Storage or contract failure.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl TransferError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            Self::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::TransferNotAllowed { .. } => "TRANSFER_NOT_ALLOWED",
            Self::MissingConfiguration(_) => "MISSING_CONFIGURATION",
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
            Self::Unexpected(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification(_))
    }
}

impl From<Rejection> for TransferError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::AmountOutOfRange { amount, min, max } => {
                Self::AmountOutOfRange { amount, min, max }
            }
            Rejection::AccountNotFound { role, number } => Self::AccountNotFound { role, number },
            Rejection::TransferNotAllowed { number, amount } => {
                Self::TransferNotAllowed { number, amount }
            }
        }
    }
}

impl From<StorageError> for TransferError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict(number) => Self::ConcurrentModification(number),
            other => Self::Unexpected(other.to_string()),
        }
    }
}

impl From<AccountError> for TransferError {
    fn from(err: AccountError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<ConfigurationError> for TransferError {
    fn from(err: ConfigurationError) -> Self {
        match err {
            ConfigurationError::Missing(key) => Self::MissingConfiguration(key),
            ConfigurationError::Unreadable { key, reason } => Self::InvalidConfiguration {
                key,
                value: String::new(),
                reason,
            },
        }
    }
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        let message = err.to_string();
        match err {
            TransferError::AmountOutOfRange { .. } | TransferError::AccountNotFound { .. } => {
                Self::Validation(message)
            }
            TransferError::TransferNotAllowed { .. } => Self::BusinessRule(message),
            TransferError::ConcurrentModification(_) => Self::Conflict(message),
            TransferError::MissingConfiguration(_) | TransferError::InvalidConfiguration { .. } => {
                Self::Configuration(message)
            }
            TransferError::Unexpected(_) => Self::Internal(message),
        }
    }
}
