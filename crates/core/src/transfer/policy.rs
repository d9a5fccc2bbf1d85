//! Validation rules for transfer attempts.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. amount within the configured limits
//! 2. origin account exists
//! 3. destination account exists
//! 4. origin can afford the amount

use rust_decimal::Decimal;
use std::str::FromStr;
use tally_shared::ConfigurationSource;
use tally_shared::types::AccountNumber;

use super::error::TransferError;
use super::types::AccountRole;
use crate::account::Account;

/// Configuration key for the smallest allowed amount.
pub const MIN_TRANSFER_VALUE_KEY: &str = "TRANSFER_MIN_VALUE";

/// Configuration key for the largest allowed amount.
pub const MAX_TRANSFER_VALUE_KEY: &str = "TRANSFER_MAX_VALUE";

/// Why a transfer attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Amount outside `[min, max]`.
    AmountOutOfRange {
        /// Requested amount.
        amount: Decimal,
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },
    /// An account is missing.
    AccountNotFound {
        /// Which side.
        role: AccountRole,
        /// Requested number.
        number: AccountNumber,
    },
    /// Origin balance does not cover the amount.
    TransferNotAllowed {
        /// Origin account.
        number: AccountNumber,
        /// Requested amount.
        amount: Decimal,
    },
}

/// Inclusive amount bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLimits {
    min: Decimal,
    max: Decimal,
}

impl TransferLimits {
    /// Builds limits, refusing `min <= 0` and `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, TransferError> {
        if min <= Decimal::ZERO {
            return Err(TransferError::InvalidConfiguration {
                key: MIN_TRANSFER_VALUE_KEY.to_string(),
                value: min.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if min > max {
            return Err(TransferError::InvalidConfiguration {
                key: MAX_TRANSFER_VALUE_KEY.to_string(),
                value: max.to_string(),
                reason: format!("must not be lower than {MIN_TRANSFER_VALUE_KEY} ({min})"),
            });
        }
        Ok(Self { min, max })
    }

    /// Reads both limits from `source`.
    pub fn from_source(source: &dyn ConfigurationSource) -> Result<Self, TransferError> {
        let min = read_decimal(source, MIN_TRANSFER_VALUE_KEY)?;
        let max = read_decimal(source, MAX_TRANSFER_VALUE_KEY)?;
        Self::new(min, max)
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    /// True if `min <= amount <= max`.
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min <= amount && amount <= self.max
    }
}

fn read_decimal(source: &dyn ConfigurationSource, key: &str) -> Result<Decimal, TransferError> {
    let raw = source.get_value(key)?;
    Decimal::from_str(raw.trim()).map_err(|e| TransferError::InvalidConfiguration {
        key: key.to_string(),
        value: raw.clone(),
        reason: e.to_string(),
    })
}

/// Stateless transfer validation.
pub struct TransferPolicy;

impl TransferPolicy {
    /// Rule 1: the amount lies within `limits`.
    pub fn check_amount(limits: &TransferLimits, amount: Decimal) -> Result<(), Rejection> {
        if limits.contains(amount) {
            Ok(())
        } else {
            Err(Rejection::AmountOutOfRange {
                amount,
                min: limits.min,
                max: limits.max,
            })
        }
    }

    /// Rules 2 and 3: the looked-up account exists.
    pub fn require_account(
        role: AccountRole,
        number: AccountNumber,
        account: Option<Account>,
    ) -> Result<Account, Rejection> {
        account.ok_or(Rejection::AccountNotFound { role, number })
    }

    /// Rule 4: the origin can afford the amount.
    pub fn check_affordable(origin: &Account, amount: Decimal) -> Result<(), Rejection> {
        if origin.is_affordable(amount) {
            Ok(())
        } else {
            Err(Rejection::TransferNotAllowed {
                number: origin.number(),
                amount,
            })
        }
    }
}
