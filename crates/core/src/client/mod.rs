//! Clients and their accounts.

pub mod error;
pub mod service;
pub mod types;


pub use error::ClientError;
pub use service::ClientService;
pub use types::{Client, ClientWithAccount};
