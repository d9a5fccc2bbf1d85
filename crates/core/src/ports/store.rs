//! Repository traits for accounts, transfers and clients.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tally_shared::types::AccountNumber;

use super::error::StorageResult;
use crate::account::Account;
use crate::client::{Client, ClientWithAccount};
use crate::transfer::{SettledTransfer, Transfer, history};

/// Repository for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get account by number.
    async fn find_by_number(&self, number: AccountNumber) -> StorageResult<Option<Account>>;

    /// Open a new account; the store assigns the number.
    async fn add(&self, opening_balance: Decimal) -> StorageResult<Account>;

    /// Write the account's balance.
    ///
    /// Fails with [`StorageError::Conflict`](super::StorageError::Conflict)
    /// if the stored version no longer equals `account.version()`. On success
    /// the stored version is incremented.
    async fn update(&self, account: &Account) -> StorageResult<()>;
}

/// Repository for transfer records. Records are append-only.
#[async_trait]
pub trait TransferStore: Send + Sync {
    /// Persist a settled attempt; the store assigns the id.
    async fn add(&self, transfer: &SettledTransfer) -> StorageResult<Transfer>;

    /// Every recorded transfer, in no particular order.
    async fn all(&self) -> StorageResult<Vec<Transfer>>;

    /// Transfers touching `number`, most recent first.
    ///
    /// Backends that can filter and sort natively should override this while
    /// keeping the ordering of [`history::involving`].
    async fn list_for_account(&self, number: AccountNumber) -> StorageResult<Vec<Transfer>> {
        Ok(history::involving(self.all().await?, number))
    }
}

/// Repository for clients.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Persist a client owning `account_number`; the store assigns the id.
    async fn add(&self, name: &str, account_number: AccountNumber) -> StorageResult<Client>;

    /// Every client with its account, ordered by client id.
    async fn all(&self) -> StorageResult<Vec<ClientWithAccount>>;

    /// The client owning `number`, if any.
    async fn find_by_account_number(
        &self,
        number: AccountNumber,
    ) -> StorageResult<Option<ClientWithAccount>>;
}
