//! Port traits for persistence.
//!
//! These traits define the storage interface used by the domain services.
//! Implementations live in `tally-db` (PostgreSQL via SeaORM) and in
//! [`crate::memory`].

pub mod error;
pub mod store;
pub mod unit_of_work;

pub use error::{StorageError, StorageResult};
pub use store::{AccountStore, ClientStore, TransferStore};
pub use unit_of_work::{Session, UnitOfWork, with_transaction};
