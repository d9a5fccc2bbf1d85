//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the async traits in [`ports`].
//!
//! # Modules
//!
//! - `account` - Account balances and their mutation rules
//! - `client` - Client onboarding
//! - `transfer` - The funds-transfer engine
//! - `ports` - Store traits and the unit of work
//! - `memory` - In-memory implementation of the ports

pub mod account;
pub mod client;
pub mod memory;
pub mod ports;
pub mod transfer;
