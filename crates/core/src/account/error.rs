//! Account mutation errors.

use rust_decimal::Decimal;
use thiserror::Error;
use tally_shared::types::AccountNumber;

/// Contract violations and overflow raised by balance mutation.
///
/// The transfer engine only calls `credit`/`debit` with amounts the policy
/// already accepted, so a negative-amount or negative-balance error means a
/// caller broke the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Credit or debit attempted with a negative amount.
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    /// Debit attempted while the balance is already negative.
    #[error("Account {number} has a negative balance of {balance}")]
    NegativeBalance {
        /// The account number.
        number: AccountNumber,
        /// The current balance.
        balance: Decimal,
    },

    /// The new balance does not fit in a decimal.
    #[error("Balance of account {0} would overflow")]
    Overflow(AccountNumber),
}
