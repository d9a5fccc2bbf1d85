//! Transfer repository. Records are never updated.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tally_core::ports::{StorageError, StorageResult, TransferStore};
use tally_core::transfer::{SettledTransfer, Transfer};
use tally_shared::types::AccountNumber;

use super::DbStore;
use crate::entities::transfers;

#[async_trait]
impl<C> TransferStore for DbStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn add(&self, transfer: &SettledTransfer) -> StorageResult<Transfer> {
        let request = transfer.request();
        let record = transfers::ActiveModel {
            origin_account_number: Set(request.origin.into_inner()),
            destination_account_number: Set(request.destination.into_inner()),
            amount: Set(request.amount),
            success: Set(transfer.success()),
            created_at: Set(request.created_at.into()),
            ..Default::default()
        };

        let model = record
            .insert(&self.conn)
            .await
            .map_err(StorageError::backend)?;
        Ok(model.into())
    }

    async fn all(&self) -> StorageResult<Vec<Transfer>> {
        let models = transfers::Entity::find()
            .all(&self.conn)
            .await
            .map_err(StorageError::backend)?;
        Ok(models.into_iter().map(Transfer::from).collect())
    }

    async fn list_for_account(&self, number: AccountNumber) -> StorageResult<Vec<Transfer>> {
        let number = number.into_inner();
        let models = transfers::Entity::find()
            .filter(
                Condition::any()
                    .add(transfers::Column::OriginAccountNumber.eq(number))
                    .add(transfers::Column::DestinationAccountNumber.eq(number)),
            )
            .order_by_desc(transfers::Column::CreatedAt)
            .order_by_desc(transfers::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StorageError::backend)?;
        Ok(models.into_iter().map(Transfer::from).collect())
    }
}
