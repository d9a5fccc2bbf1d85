//! Client onboarding and lookup.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::types::AccountNumber;
use tracing::info;

use super::error::ClientError;
use super::types::ClientWithAccount;
use crate::ports::{UnitOfWork, with_transaction};

/// Client service.
pub struct ClientService {
    uow: Arc<dyn UnitOfWork>,
}

impl ClientService {
    /// Creates a service over a unit of work.
    #[must_use]
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    /// Opens an account with `opening_balance` and a client owning it.
    ///
    /// Both rows are written in one transaction.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if `name` is blank
    /// - `InvalidOpeningBalance` if `opening_balance` is negative
    /// - `Unexpected` for storage failures (nothing is written)
    pub async fn create_account_and_client(
        &self,
        name: &str,
        opening_balance: Decimal,
    ) -> Result<ClientWithAccount, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::InvalidName);
        }
        if opening_balance < Decimal::ZERO {
            return Err(ClientError::InvalidOpeningBalance(opening_balance));
        }

        let name = name.to_string();
        let created = with_transaction::<_, ClientError, _>(self.uow.as_ref(), move |session| {
            Box::pin(async move {
                let account = session.accounts().add(opening_balance).await?;
                session.save_changes().await?;

                let client = session.clients().add(&name, account.number()).await?;
                session.save_changes().await?;

                Ok(ClientWithAccount { client, account })
            })
        })
        .await?;

        info!(
            client_id = %created.client.id,
            account_number = %created.account.number(),
            "Client onboarded"
        );
        Ok(created)
    }

    /// Every client with its account, ordered by client id.
    pub async fn list_clients(&self) -> Result<Vec<ClientWithAccount>, ClientError> {
        Ok(self.uow.clients().all().await?)
    }

    /// The client owning `number`.
    pub async fn get_by_account_number(
        &self,
        number: AccountNumber,
    ) -> Result<ClientWithAccount, ClientError> {
        self.uow
            .clients()
            .find_by_account_number(number)
            .await?
            .ok_or(ClientError::NotFound(number))
    }
}
