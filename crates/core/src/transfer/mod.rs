//! Funds transfers between accounts.
//!
//! This module implements the transfer engine:
//! - Transfer states (Pending, Rejected, Committed)
//! - Validation policy and configurable amount limits
//! - Audit recording of rejected attempts
//! - Atomic commit through the unit of work
//! - Per-account history

pub mod audit;
pub mod error;
pub mod history;
pub mod policy;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use audit::AuditRecorder;
pub use error::TransferError;
pub use policy::{
    MAX_TRANSFER_VALUE_KEY, MIN_TRANSFER_VALUE_KEY, Rejection, TransferLimits, TransferPolicy,
};
pub use service::TransferService;
pub use types::{AccountRole, SettledTransfer, Transfer, TransferRequest, TransferState};
