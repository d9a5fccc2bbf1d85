//! Client repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tally_core::client::{Client, ClientWithAccount};
use tally_core::ports::{ClientStore, StorageError, StorageResult};
use tally_shared::types::AccountNumber;

use super::{DbStore, storage_error};
use crate::entities::{accounts, clients};

fn with_account(
    client: clients::Model,
    account: Option<accounts::Model>,
) -> StorageResult<ClientWithAccount> {
    let account = account.ok_or_else(|| {
        StorageError::NotFound(format!(
            "account {} of client {}",
            client.account_number, client.id
        ))
    })?;
    Ok(ClientWithAccount {
        client: client.into(),
        account: account.into(),
    })
}

#[async_trait]
impl<C> ClientStore for DbStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn add(&self, name: &str, account_number: AccountNumber) -> StorageResult<Client> {
        let client = clients::ActiveModel {
            name: Set(name.to_string()),
            account_number: Set(account_number.into_inner()),
            ..Default::default()
        };

        let model = client
            .insert(&self.conn)
            .await
            .map_err(|e| storage_error(e, || format!("account {account_number}")))?;
        Ok(model.into())
    }

    async fn all(&self) -> StorageResult<Vec<ClientWithAccount>> {
        clients::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_asc(clients::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StorageError::backend)?
            .into_iter()
            .map(|(client, account)| with_account(client, account))
            .collect()
    }

    async fn find_by_account_number(
        &self,
        number: AccountNumber,
    ) -> StorageResult<Option<ClientWithAccount>> {
        clients::Entity::find()
            .filter(clients::Column::AccountNumber.eq(number.into_inner()))
            .find_also_related(accounts::Entity)
            .one(&self.conn)
            .await
            .map_err(StorageError::backend)?
            .map(|(client, account)| with_account(client, account))
            .transpose()
    }
}
