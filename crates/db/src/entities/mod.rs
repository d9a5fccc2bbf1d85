//! `SeaORM` entities.

pub mod accounts;
pub mod clients;
pub mod transfers;
