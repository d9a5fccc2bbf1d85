//! Per-account transfer history.

use std::cmp::Reverse;

use tally_shared::types::AccountNumber;

use super::types::Transfer;

/// Transfers where `number` is origin or destination, newest first.
///
/// Ties on `created_at` are broken by descending id.
pub fn involving(transfers: impl IntoIterator<Item = Transfer>, number: AccountNumber) -> Vec<Transfer> {
    let mut matching: Vec<Transfer> = transfers
        .into_iter()
        .filter(|transfer| transfer.involves(number))
        .collect();
    matching.sort_by_key(|transfer| Reverse((transfer.created_at, transfer.id)));
    matching
}
