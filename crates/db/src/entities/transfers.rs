//! `SeaORM` Entity for transfers table.
//!
//! Account numbers carry no foreign key: rejected attempts may name accounts
//! that do not exist.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tally_core::transfer::Transfer;
use tally_shared::types::{AccountNumber, TransferId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub origin_account_number: i32,
    pub destination_account_number: i32,
    pub amount: Decimal,
    pub success: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Transfer {
    fn from(model: Model) -> Self {
        Self {
            id: TransferId::new(model.id),
            origin_account_number: AccountNumber::new(model.origin_account_number),
            destination_account_number: AccountNumber::new(model.destination_account_number),
            amount: model.amount,
            success: model.success,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
