//! Balance-holding accounts.
//!
//! An [`Account`] is loaded fresh for every request and owned exclusively by
//! it. The balance can only move through [`Account::credit`] and
//! [`Account::debit`].

pub mod error;
pub mod types;

pub use error::AccountError;
pub use types::Account;
