//! Unit of work and scoped transactions.
//!
//! A [`UnitOfWork`] hands out auto-committing stores for standalone writes
//! and opens [`Session`]s for writes that must land together. Prefer
//! [`with_transaction`] over driving a session by hand: it commits on `Ok` and
//! rolls back on `Err`. A session dropped mid-flight (for example when the
//! request future is cancelled) is rolled back by every backend.

use async_trait::async_trait;
use futures::future::BoxFuture;
use tracing::error;

use super::error::{StorageError, StorageResult};
use super::store::{AccountStore, ClientStore, TransferStore};

/// An open transaction.
#[async_trait]
pub trait Session: Send + Sync {
    /// Accounts, bound to this transaction.
    fn accounts(&self) -> &dyn AccountStore;

    /// Transfers, bound to this transaction.
    fn transfers(&self) -> &dyn TransferStore;

    /// Clients, bound to this transaction.
    fn clients(&self) -> &dyn ClientStore;

    /// Flush pending writes without committing.
    async fn save_changes(&self) -> StorageResult<()>;

    /// Make every write of this session durable.
    async fn commit(self: Box<Self>) -> StorageResult<()>;

    /// Discard every write of this session.
    async fn rollback(self: Box<Self>) -> StorageResult<()>;
}

/// Entry point to persistence for one request.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Accounts, outside any transaction.
    fn accounts(&self) -> &dyn AccountStore;

    /// Transfers, outside any transaction. Writes are durable immediately.
    fn transfers(&self) -> &dyn TransferStore;

    /// Clients, outside any transaction.
    fn clients(&self) -> &dyn ClientStore;

    /// Open a transaction.
    async fn begin(&self) -> StorageResult<Box<dyn Session>>;
}

/// Runs `work` inside one transaction.
///
/// Commits if `work` returns `Ok`, otherwise rolls back and returns the error
/// from `work`. A failing rollback is logged; it never replaces that error.
///
/// ```ignore
/// let transfer = with_transaction::<_, TransferError, _>(uow, move |session| {
///     Box::pin(async move {
///         session.accounts().update(&origin).await?;
///         Ok(session.transfers().add(&settled).await?)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<T, E, F>(uow: &dyn UnitOfWork, work: F) -> Result<T, E>
where
    T: Send,
    E: From<StorageError> + Send,
    F: for<'s> FnOnce(&'s dyn Session) -> BoxFuture<'s, Result<T, E>> + Send,
{
    let session = uow.begin().await?;

    match work(session.as_ref()).await {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = session.rollback().await {
                error!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}
