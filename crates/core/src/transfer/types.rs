//! Transfer domain types.
//!
//! A transfer attempt moves through these states:
//! - Pending: a [`TransferRequest`] that has not been evaluated yet
//! - Rejected: settled with `success = false` by [`TransferRequest::reject`]
//! - Committed: settled with `success = true` by [`TransferRequest::approve`]
//!
//! Settling consumes the request, so an attempt is settled exactly once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tally_shared::types::{AccountNumber, TransferId};

/// Settled state of a recorded transfer attempt.
///
/// A pending attempt is a [`TransferRequest`] and never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferState {
    /// Failed validation; recorded with `success = false`.
    Rejected,
    /// Balances moved; recorded with `success = true`.
    Committed,
}

impl TransferState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Committed => "committed",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of a transfer an account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// The account being debited.
    Origin,
    /// The account being credited.
    Destination,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// A transfer attempt in the Pending state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Account to debit.
    pub origin: AccountNumber,
    /// Account to credit.
    pub destination: AccountNumber,
    /// Amount to move.
    pub amount: Decimal,
    /// When the attempt was made.
    pub created_at: DateTime<Utc>,
}

impl TransferRequest {
    /// Creates a request stamped with the current time.
    #[must_use]
    pub fn new(origin: AccountNumber, destination: AccountNumber, amount: Decimal) -> Self {
        Self::at(origin, destination, amount, Utc::now())
    }

    /// Creates a request with an explicit timestamp.
    #[must_use]
    pub const fn at(
        origin: AccountNumber,
        destination: AccountNumber,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            origin,
            destination,
            amount,
            created_at,
        }
    }

    /// True if money would leave and enter the same account.
    #[must_use]
    pub fn is_self_transfer(&self) -> bool {
        self.origin == self.destination
    }

    /// Settles the attempt as committed.
    #[must_use]
    pub const fn approve(self) -> SettledTransfer {
        SettledTransfer {
            request: self,
            success: true,
        }
    }

    /// Settles the attempt as rejected.
    #[must_use]
    pub const fn reject(self) -> SettledTransfer {
        SettledTransfer {
            request: self,
            success: false,
        }
    }
}

/// A transfer attempt whose outcome is decided but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledTransfer {
    request: TransferRequest,
    success: bool,
}

impl SettledTransfer {
    /// The underlying request.
    #[must_use]
    pub const fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// Whether balances were moved.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Builds the stored record once the store has assigned an id.
    #[must_use]
    pub fn to_record(&self, id: TransferId) -> Transfer {
        Transfer {
            id,
            origin_account_number: self.request.origin,
            destination_account_number: self.request.destination,
            amount: self.request.amount,
            success: self.success,
            created_at: self.request.created_at,
        }
    }
}

/// A persisted transfer record. Never modified after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Store-assigned id.
    pub id: TransferId,
    /// Debited account. May not exist for rejected attempts.
    pub origin_account_number: AccountNumber,
    /// Credited account. May not exist for rejected attempts.
    pub destination_account_number: AccountNumber,
    /// Requested amount.
    pub amount: Decimal,
    /// Whether balances were moved.
    pub success: bool,
    /// When the attempt was made.
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    /// True if `number` is the origin or the destination.
    #[must_use]
    pub fn involves(&self, number: AccountNumber) -> bool {
        self.origin_account_number == number || self.destination_account_number == number
    }

    /// Rejected or Committed.
    #[must_use]
    pub const fn state(&self) -> TransferState {
        if self.success {
            TransferState::Committed
        } else {
            TransferState::Rejected
        }
    }
}
