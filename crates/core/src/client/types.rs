//! Client entity.

use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountNumber, ClientId};

use crate::account::Account;

/// An account holder. Each client owns exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Store-assigned id.
    pub id: ClientId,
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// The owned account.
    pub account_number: AccountNumber,
}

/// A client together with its loaded account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientWithAccount {
    /// The client.
    pub client: Client,
    /// Its account.
    pub account: Account,
}
