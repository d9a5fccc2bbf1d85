//! Repository implementations of the core store ports.
//!
//! [`DbStore`] wraps any `SeaORM` connection: the pooled
//! `DatabaseConnection` for standalone writes, or a `DatabaseTransaction`
//! inside a session. Each submodule implements one port for it.

pub mod account;
pub mod client;
pub mod transfer;

use sea_orm::{ConnectionTrait, DbErr, SqlErr};
use tally_core::ports::StorageError;

/// Store handle over a `SeaORM` connection or transaction.
#[derive(Debug)]
pub struct DbStore<C> {
    conn: C,
}

impl<C: ConnectionTrait> DbStore<C> {
    /// Wraps a connection.
    #[must_use]
    pub const fn new(conn: C) -> Self {
        Self { conn }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &C {
        &self.conn
    }

    /// Unwraps the connection.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.conn
    }
}

/// Maps a driver error to a port error, naming the offending row when the
/// database reports a broken reference.
fn storage_error(err: DbErr, context: impl FnOnce() -> String) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => StorageError::NotFound(context()),
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            StorageError::Backend(format!("{}: {detail}", context()))
        }
        _ => StorageError::backend(err),
    }
}
