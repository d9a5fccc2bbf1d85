//! `SeaORM` unit of work.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tally_core::ports::{
    AccountStore, ClientStore, Session, StorageError, StorageResult, TransferStore, UnitOfWork,
};

use crate::repositories::DbStore;

/// Unit of work over a connection pool.
#[derive(Debug)]
pub struct DbUnitOfWork {
    store: DbStore<DatabaseConnection>,
}

impl DbUnitOfWork {
    /// Creates a unit of work over `db`.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            store: DbStore::new(db),
        }
    }
}

#[async_trait]
impl UnitOfWork for DbUnitOfWork {
    fn accounts(&self) -> &dyn AccountStore {
        &self.store
    }

    fn transfers(&self) -> &dyn TransferStore {
        &self.store
    }

    fn clients(&self) -> &dyn ClientStore {
        &self.store
    }

    async fn begin(&self) -> StorageResult<Box<dyn Session>> {
        let txn = self
            .store
            .connection()
            .begin()
            .await
            .map_err(StorageError::backend)?;
        Ok(Box::new(DbSession {
            store: DbStore::new(txn),
        }))
    }
}

/// An open database transaction. Dropping it rolls back.
#[derive(Debug)]
pub struct DbSession {
    store: DbStore<DatabaseTransaction>,
}

#[async_trait]
impl Session for DbSession {
    fn accounts(&self) -> &dyn AccountStore {
        &self.store
    }

    fn transfers(&self) -> &dyn TransferStore {
        &self.store
    }

    fn clients(&self) -> &dyn ClientStore {
        &self.store
    }

    /// Statements run as they are issued; nothing is buffered.
    async fn save_changes(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        self.store
            .into_inner()
            .commit()
            .await
            .map_err(StorageError::backend)
    }

    async fn rollback(self: Box<Self>) -> StorageResult<()> {
        self.store
            .into_inner()
            .rollback()
            .await
            .map_err(StorageError::backend)
    }
}
