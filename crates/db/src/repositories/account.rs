//! Account repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tally_core::account::Account;
use tally_core::ports::{AccountStore, StorageError, StorageResult};
use tally_shared::types::AccountNumber;

use super::DbStore;
use crate::entities::accounts;

#[async_trait]
impl<C> AccountStore for DbStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_by_number(&self, number: AccountNumber) -> StorageResult<Option<Account>> {
        let model = accounts::Entity::find_by_id(number.into_inner())
            .one(&self.conn)
            .await
            .map_err(StorageError::backend)?;
        Ok(model.map(Account::from))
    }

    async fn add(&self, opening_balance: Decimal) -> StorageResult<Account> {
        let account = accounts::ActiveModel {
            balance: Set(opening_balance),
            version: Set(0),
            ..Default::default()
        };

        let model = account
            .insert(&self.conn)
            .await
            .map_err(StorageError::backend)?;
        Ok(model.into())
    }

    async fn update(&self, account: &Account) -> StorageResult<()> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::Balance, Expr::value(account.balance()))
            .col_expr(
                accounts::Column::Version,
                Expr::col(accounts::Column::Version).add(1),
            )
            .filter(accounts::Column::Number.eq(account.number().into_inner()))
            .filter(accounts::Column::Version.eq(account.version()))
            .exec(&self.conn)
            .await
            .map_err(StorageError::backend)?;

        // Zero rows: the version moved on (or the row vanished) since load.
        if result.rows_affected == 0 {
            return Err(StorageError::Conflict(account.number()));
        }
        Ok(())
    }
}
