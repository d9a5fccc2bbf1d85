//! Storage port errors.

use tally_shared::types::AccountNumber;
use thiserror::Error;

/// Result type alias for port operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures reported by a store or unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The account changed since it was loaded.
    #[error("Account {0} was modified concurrently")]
    Conflict(AccountNumber),

    /// A referenced row does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The backend rejected or failed the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Builds a backend error from anything displayable.
    #[must_use]
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
